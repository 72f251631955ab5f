pub mod bavanakutayimas;
pub mod campaigns;
pub mod churches;
pub mod dues;
pub mod houses;
pub mod members;
pub mod news;
pub mod session;
pub mod stothrakazhcha;
pub mod transactions;
pub mod units;
pub mod users;

use uuid::Uuid;

use crate::auth::Role;
use crate::database::models::PayerRef;
use crate::error::ApiError;
use crate::ledger::LedgerError;
use crate::middleware::AuthUser;

/// Resolve the payer a contribution is recorded for. Admins name the payer
/// explicitly; members always contribute as themselves.
pub(crate) fn resolve_payer(
    auth: &AuthUser,
    member_id: Option<Uuid>,
    house_id: Option<Uuid>,
) -> Result<PayerRef, ApiError> {
    if auth.role == Role::Member {
        let own = auth
            .member_id
            .ok_or_else(|| ApiError::forbidden("Member account has no member record"))?;
        if member_id.is_some_and(|m| m != own) || house_id.is_some() {
            return Err(ApiError::forbidden("Members can only contribute as themselves"));
        }
        return Ok(PayerRef::member(own));
    }

    match (member_id, house_id) {
        (Some(m), None) => Ok(PayerRef::member(m)),
        (None, Some(h)) => Ok(PayerRef::house(h)),
        (Some(_), Some(_)) => {
            Err(ApiError::validation_error("Provide either memberId or houseId, not both"))
        }
        (None, None) => match auth.member_id {
            Some(own) => Ok(PayerRef::member(own)),
            None => Err(LedgerError::MissingPayer.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(role: Role, member_id: Option<Uuid>) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            role,
            church_id: Some(Uuid::new_v4()),
            unit_id: None,
            bavanakutayima_id: None,
            house_id: None,
            member_id,
        }
    }

    #[test]
    fn members_always_pay_as_themselves() {
        let own = Uuid::new_v4();
        let a = auth(Role::Member, Some(own));
        assert_eq!(resolve_payer(&a, None, None).unwrap(), PayerRef::member(own));
        assert_eq!(resolve_payer(&a, Some(own), None).unwrap(), PayerRef::member(own));
        assert!(resolve_payer(&a, Some(Uuid::new_v4()), None).is_err());
        assert!(resolve_payer(&a, None, Some(Uuid::new_v4())).is_err());
    }

    #[test]
    fn admins_name_the_payer() {
        let a = auth(Role::ChurchAdmin, None);
        let m = Uuid::new_v4();
        let h = Uuid::new_v4();
        assert_eq!(resolve_payer(&a, Some(m), None).unwrap(), PayerRef::member(m));
        assert_eq!(resolve_payer(&a, None, Some(h)).unwrap(), PayerRef::house(h));
        assert!(resolve_payer(&a, Some(m), Some(h)).is_err());
        assert!(resolve_payer(&a, None, None).is_err());
    }
}
