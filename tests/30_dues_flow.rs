mod common;

// End-to-end ledger flow against a real database. Gated: set PARISH_TEST=1
// and DATABASE_URL to run.

use anyhow::Result;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use parish_api_rust::database::manager::DatabaseManager;
use parish_api_rust::database::models::bavanakutayima::CreateBavanakutayimaRequest;
use parish_api_rust::database::models::church::CreateChurchRequest;
use parish_api_rust::database::models::contribution::{
    AmountType, ContributionMode, CreateCampaignRequest,
};
use parish_api_rust::database::models::house::CreateHouseRequest;
use parish_api_rust::database::models::member::CreateMemberRequest;
use parish_api_rust::database::models::{EventKind, PayerRef, PaymentMethod};
use parish_api_rust::database::repos::{
    BavanakutayimaRepo, ChurchRepo, DueRepo, EventRepo, HouseRepo, MemberRepo, UnitRepo,
};
use parish_api_rust::filter::HierarchyParams;
use parish_api_rust::services;

fn dec(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

#[tokio::test]
async fn fixed_campaign_sweep_and_payment_lifecycle() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: PARISH_TEST/DATABASE_URL not set");
        return Ok(());
    }

    DatabaseManager::migrate().await?;
    let pool = DatabaseManager::pool().await?;

    // Fresh church with three members in one house
    let church = ChurchRepo::create(
        &pool,
        &CreateChurchRequest { name: format!("St. Thomas {}", uuid::Uuid::new_v4()), place: None },
    )
    .await?;
    let unit = UnitRepo::create(
        &pool,
        church.id,
        &parish_api_rust::database::models::unit::CreateUnitRequest {
            name: "Unit One".into(),
            unit_number: None,
        },
    )
    .await?;
    let kutayima = BavanakutayimaRepo::create(
        &pool,
        church.id,
        &CreateBavanakutayimaRequest {
            unit_id: unit.id,
            name: "Bethel".into(),
            kutayima_number: None,
        },
    )
    .await?;
    let house = HouseRepo::create(
        &pool,
        church.id,
        &CreateHouseRequest {
            unit_id: unit.id,
            bavanakutayima_id: kutayima.id,
            family_name: "Kandathil".into(),
        },
    )
    .await?;

    let mut members = Vec::new();
    for name in ["M1", "M2", "M3"] {
        members.push(
            MemberRepo::create(
                &pool,
                church.id,
                &CreateMemberRequest {
                    house_id: house.id,
                    name: name.into(),
                    phone: None,
                    email: None,
                },
            )
            .await?,
        );
    }

    // Fixed-500 campaign already past its due date
    let campaign = EventRepo::create_campaign(
        &pool,
        church.id,
        &CreateCampaignRequest {
            name: "Roof Fund".into(),
            description: None,
            amount_type: AmountType::PerMember,
            contribution_mode: ContributionMode::Fixed,
            fixed_amount: Some(dec(500)),
            minimum_amount: None,
            due_date: Some(Utc::now() - Duration::days(1)),
        },
    )
    .await?;

    // M1 contributes in full; a wrong amount on fixed mode is rejected
    let summary = services::contribute(
        EventKind::Campaign,
        campaign.id,
        church.id,
        PayerRef::member(members[0].id),
        dec(500),
        PaymentMethod::Cash,
        None,
    )
    .await?;
    assert_eq!(summary.total_collected, dec(500));
    assert_eq!(summary.total_contributors, 1);

    let rejected = services::contribute(
        EventKind::Campaign,
        campaign.id,
        church.id,
        PayerRef::member(members[1].id),
        dec(499),
        PaymentMethod::Cash,
        None,
    )
    .await;
    assert!(rejected.is_err());

    // Sweep creates dues for M2 and M3 only
    let report = services::process_dues(EventKind::Campaign, church.id, Utc::now()).await?;
    assert_eq!(report.total_members_processed, 2);
    assert_eq!(report.total_houses_processed, 0);

    // Re-running is a zero-delta no-op
    let again = services::process_dues(EventKind::Campaign, church.id, Utc::now()).await?;
    assert_eq!(again.total_members_processed, 0);
    assert_eq!(again.events_processed, 0);

    let dues = DueRepo::list_outstanding(
        &pool,
        EventKind::Campaign,
        church.id,
        &HierarchyParams::default(),
    )
    .await?;
    let m2_due = dues
        .iter()
        .find(|d| d.name == "M2")
        .expect("M2 should owe the campaign");
    assert_eq!(m2_due.due_amount, dec(500));
    assert_eq!(m2_due.remaining_amount, dec(500));
    assert_eq!(m2_due.campaign_name, "Roof Fund");
    assert!(!m2_due.hierarchical_number.is_empty());

    // Partial then final payment settles the due; over-payment is rejected
    let after_partial = services::pay_due(
        EventKind::Campaign,
        m2_due.id,
        church.id,
        dec(200),
        PaymentMethod::Cash,
        None,
    )
    .await?;
    assert_eq!(after_partial.paid_amount, dec(200));
    assert_eq!(after_partial.balance, dec(300));
    assert!(!after_partial.is_paid);

    let overpay = services::pay_due(
        EventKind::Campaign,
        m2_due.id,
        church.id,
        dec(301),
        PaymentMethod::Cash,
        None,
    )
    .await;
    assert!(overpay.is_err());

    let settled = services::pay_due(
        EventKind::Campaign,
        m2_due.id,
        church.id,
        dec(300),
        PaymentMethod::Card,
        None,
    )
    .await?;
    assert!(settled.is_paid);
    assert_eq!(settled.balance, dec(0));

    // A settled due leaves the outstanding listing
    let remaining = DueRepo::list_outstanding(
        &pool,
        EventKind::Campaign,
        church.id,
        &HierarchyParams::default(),
    )
    .await?;
    assert!(remaining.iter().all(|d| d.name != "M2"));

    // Payments landed in the contributor log: M1's 500 plus M2's 200+300,
    // from two distinct payers
    let refreshed = EventRepo::get_campaign(&pool, church.id, campaign.id)
        .await?
        .expect("campaign still exists");
    assert_eq!(refreshed.total_collected, dec(1000));
    assert_eq!(refreshed.total_contributors, 2);

    Ok(())
}
