//! Server-side hierarchy scoping for list endpoints. Clients pass
//! `unitId`/`bavanakutayimaId`/`houseId`/`memberId` query parameters and get
//! back already-scoped rows; the church scope always comes from the caller's
//! claims, never from the query string.

use serde::Deserialize;
use uuid::Uuid;

use super::error::FilterError;
use crate::auth::Role;
use crate::middleware::AuthUser;

/// Hierarchy filter parameters accepted by list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HierarchyParams {
    #[serde(rename = "unitId")]
    pub unit_id: Option<Uuid>,
    #[serde(rename = "bavanakutayimaId")]
    pub bavanakutayima_id: Option<Uuid>,
    #[serde(rename = "houseId")]
    pub house_id: Option<Uuid>,
    #[serde(rename = "memberId")]
    pub member_id: Option<Uuid>,
    pub limit: Option<i64>,
}

impl HierarchyParams {
    /// Tighten the filter to the caller's own scope. Members only ever see
    /// their own rows; unit and kutayima admins are pinned to their branch.
    pub fn scoped_to(mut self, auth: &AuthUser) -> Self {
        match auth.role {
            Role::Member => {
                self.member_id = auth.member_id.or(self.member_id);
                self.house_id = auth.house_id.or(self.house_id);
            }
            Role::UnitAdmin => {
                self.unit_id = auth.unit_id.or(self.unit_id);
            }
            Role::KutayimaAdmin => {
                self.bavanakutayima_id = auth.bavanakutayima_id.or(self.bavanakutayima_id);
            }
            Role::SuperAdmin | Role::ChurchAdmin => {}
        }
        self
    }
}

/// Incremental WHERE-clause builder producing `$n`-indexed conditions with
/// UUID bind values. Column expressions are developer-written constants; the
/// builder still validates plain column references to catch typos early.
#[derive(Debug)]
pub struct ScopedWhere {
    conditions: Vec<String>,
    params: Vec<Uuid>,
    param_index: usize,
}

impl ScopedWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            conditions: vec![],
            params: vec![],
            param_index: starting_param_index,
        }
    }

    /// Add `column = $n` for a validated plain column reference
    /// (optionally alias-qualified).
    pub fn eq(&mut self, column: &str, value: Uuid) -> Result<&mut Self, FilterError> {
        Self::validate_column(column)?;
        self.push(format!("{} = ${}", column, self.param_index + 1), value);
        Ok(self)
    }

    pub fn eq_opt(&mut self, column: &str, value: Option<Uuid>) -> Result<&mut Self, FilterError> {
        if let Some(v) = value {
            self.eq(column, v)?;
        }
        Ok(self)
    }

    /// Add a condition on a trusted SQL expression (e.g. a COALESCE over two
    /// join aliases). The value is still bound, never interpolated.
    pub fn expr_eq(&mut self, expr: &str, value: Uuid) -> &mut Self {
        self.push(format!("{} = ${}", expr, self.param_index + 1), value);
        self
    }

    pub fn expr_eq_opt(&mut self, expr: &str, value: Option<Uuid>) -> &mut Self {
        if let Some(v) = value {
            self.expr_eq(expr, v);
        }
        self
    }

    /// Add a trusted parameterless condition (e.g. a type-tag match).
    pub fn raw(&mut self, condition: &str) -> &mut Self {
        self.conditions.push(condition.to_string());
        self
    }

    fn push(&mut self, condition: String, value: Uuid) {
        self.conditions.push(condition);
        self.params.push(value);
        self.param_index += 1;
    }

    /// Render to a WHERE body plus its bind values, in `$n` order.
    pub fn build(&self) -> (String, Vec<Uuid>) {
        let clause = if self.conditions.is_empty() {
            "1=1".to_string()
        } else {
            self.conditions.join(" AND ")
        };
        (clause, self.params.clone())
    }

    pub fn next_param_index(&self) -> usize {
        self.param_index
    }

    fn validate_column(column: &str) -> Result<(), FilterError> {
        let valid = !column.is_empty()
            && column.split('.').count() <= 2
            && column.split('.').all(|part| {
                !part.is_empty()
                    && part.chars().next().map(|c| c.is_alphabetic() || c == '_').unwrap_or(false)
                    && part.chars().all(|c| c.is_alphanumeric() || c == '_')
            });
        if valid {
            Ok(())
        } else {
            Err(FilterError::InvalidColumn(column.to_string()))
        }
    }
}

/// Apply the configured cap to a client-supplied limit.
pub fn capped_limit(requested: Option<i64>) -> i64 {
    let config = crate::config::config();
    let max = config.filter.max_limit;
    match requested {
        Some(limit) if limit > 0 && limit <= max => limit,
        Some(limit) if limit > max => {
            if config.filter.debug_logging {
                tracing::warn!("Limit {} exceeds max {}, capping to max", limit, max);
            }
            max
        }
        _ => max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_indexed_conditions_in_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut w = ScopedWhere::new(0);
        w.eq("d.church_id", a).unwrap();
        w.eq_opt("d.unit_id", Some(b)).unwrap();
        w.eq_opt("d.house_id", None).unwrap();

        let (clause, params) = w.build();
        assert_eq!(clause, "d.church_id = $1 AND d.unit_id = $2");
        assert_eq!(params, vec![a, b]);
        assert_eq!(w.next_param_index(), 2);
    }

    #[test]
    fn empty_filter_renders_a_tautology() {
        let (clause, params) = ScopedWhere::new(0).build();
        assert_eq!(clause, "1=1");
        assert!(params.is_empty());
    }

    #[test]
    fn rejects_suspicious_column_names() {
        let mut w = ScopedWhere::new(0);
        assert!(w.eq("church_id; DROP TABLE dues", Uuid::new_v4()).is_err());
        assert!(w.eq("", Uuid::new_v4()).is_err());
        assert!(w.eq("a.b.c", Uuid::new_v4()).is_err());
        assert!(w.eq("1column", Uuid::new_v4()).is_err());
    }

    #[test]
    fn raw_conditions_take_no_params() {
        let v = Uuid::new_v4();
        let mut w = ScopedWhere::new(0);
        w.raw("NOT d.is_paid");
        w.expr_eq("d.due_for_id", v);
        let (clause, params) = w.build();
        assert_eq!(clause, "NOT d.is_paid AND d.due_for_id = $1");
        assert_eq!(params, vec![v]);
    }

    #[test]
    fn expressions_are_trusted_but_values_still_bound() {
        let v = Uuid::new_v4();
        let mut w = ScopedWhere::new(2);
        w.expr_eq("COALESCE(m.unit_id, h.unit_id)", v);
        let (clause, params) = w.build();
        assert_eq!(clause, "COALESCE(m.unit_id, h.unit_id) = $3");
        assert_eq!(params, vec![v]);
    }

    #[test]
    fn member_role_is_pinned_to_own_rows() {
        let member_id = Uuid::new_v4();
        let auth = AuthUser {
            user_id: Uuid::new_v4(),
            role: Role::Member,
            church_id: Some(Uuid::new_v4()),
            unit_id: None,
            bavanakutayima_id: None,
            house_id: None,
            member_id: Some(member_id),
        };
        // A member asking for someone else's dues still only gets their own
        let params = HierarchyParams {
            member_id: Some(Uuid::new_v4()),
            ..Default::default()
        }
        .scoped_to(&auth);
        assert_eq!(params.member_id, Some(member_id));
    }
}
