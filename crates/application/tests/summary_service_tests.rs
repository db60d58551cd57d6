mod common;

use application::SummaryWindow;
use chrono::{TimeZone, Utc};
use common::{Harness, date, dec};
use domain::evaluation::ScoreEntry;
use domain::period::Quarter;
use domain::sales::{FuelSalesEntry, ShopSalesEntry};
use domain::{Actor, DomainError, JobRole, Pump, Site};

fn fuel(day: chrono::NaiveDate, captain: i32, pms: &str) -> FuelSalesEntry {
    FuelSalesEntry {
        date: day,
        pump: Pump::Pump1,
        captain,
        pms_sales: dec(pms),
        dx_sales: dec("0"),
        vp_sales: dec("0"),
    }
}

#[tokio::test]
async fn test_fuel_summary_buckets_stored_performance() {
    let h = Harness::new();
    let boss = h.actor("0500000001", JobRole::Manager, Site::Airport, false).await;
    let (seller, captain) = h.captain("0500000002", JobRole::CustomerChampion, Site::Airport).await;
    h.targets
        .set_pump_target(&boss, Site::Airport, Pump::Pump1, dec("1000"))
        .await
        .unwrap();

    for (day, pms) in [
        (date(2025, 2, 10), "800"),
        (date(2025, 2, 11), "900"),
        (date(2025, 5, 20), "1000"),
        (date(2024, 12, 30), "500"),
    ] {
        h.sales.record_fuel(&seller, fuel(day, captain.id, pms)).await.unwrap();
    }

    let window = SummaryWindow {
        year: 2025,
        last_n_days: 30,
        today: date(2025, 6, 1),
    };
    let summary = h.summaries.fuel_summary(seller.user.id, window).await.unwrap();
    let breakdown = &summary.breakdown;

    // All years: (80 + 90 + 100 + 50) / 4
    assert_eq!(breakdown.average_performance, dec("80.00"));
    assert_eq!(breakdown.quarterly_performance[0].average, dec("85.00"));
    assert_eq!(breakdown.quarterly_performance[1].average, dec("100.00"));
    assert_eq!(breakdown.quarterly_performance[2].average, dec("0"));
    let months: Vec<&str> = breakdown.monthly_performance.iter().map(|m| m.month).collect();
    assert_eq!(months, vec!["Feb", "May"]);
    assert_eq!(breakdown.daily_performance.len(), 1);
    assert_eq!(breakdown.daily_performance[0].day, "Tue");

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["meta"]["last_n_days"], 30);
    assert_eq!(json["quarterly_performance"][0]["quarter"], "Q1");
    assert_eq!(json["daily_performance"][0]["date"], "2025-05-20");
}

#[tokio::test]
async fn test_oversized_window_covers_whole_year() {
    let h = Harness::new();
    let boss = h.actor("0500000001", JobRole::Manager, Site::Airport, false).await;
    let (seller, captain) = h.captain("0500000002", JobRole::CustomerChampion, Site::Airport).await;
    h.targets
        .set_pump_target(&boss, Site::Airport, Pump::Pump1, dec("1000"))
        .await
        .unwrap();
    for (day, pms) in [(date(2025, 1, 6), "700"), (date(2025, 5, 20), "900")] {
        h.sales.record_fuel(&seller, fuel(day, captain.id, pms)).await.unwrap();
    }

    let window = SummaryWindow {
        year: 2025,
        last_n_days: 4_000_000_000,
        today: date(2025, 6, 1),
    };
    let summary = h.summaries.fuel_summary(seller.user.id, window).await.unwrap();

    assert_eq!(summary.breakdown.daily_performance.len(), 2);
    assert_eq!(summary.meta.last_n_days, 4_000_000_000);
}

#[tokio::test]
async fn test_evaluation_summary_limited_to_current_quarter() {
    let h = Harness::new();
    let (captain, _) = h.captain("0500000003", JobRole::CustomerChampion, Site::Bohye).await;
    let ama = h.attendant("Ama", JobRole::CustomerChampion, Site::Bohye).await;

    for (day, raw) in [
        (date(2025, 3, 26), "7"),
        (date(2025, 4, 9), "3.5"),
        (date(2025, 4, 16), "7"),
    ] {
        h.evaluations
            .submit_weekly(
                &captain,
                &[ScoreEntry {
                    attendant: ama.id,
                    raw_score: dec(raw),
                }],
                day,
            )
            .await
            .unwrap();
    }

    let summary = h
        .summaries
        .evaluation_summary(ama.id, date(2025, 5, 1))
        .await
        .unwrap();
    assert_eq!(summary.qtr_score, dec("75.00"));
    let dates: Vec<_> = summary.score_history.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![date(2025, 4, 16), date(2025, 4, 9)]);

    let empty = h
        .summaries
        .attendance_summary(ama.id, date(2025, 5, 1))
        .await
        .unwrap();
    assert_eq!(empty.qtr_score, dec("0"));
    assert!(empty.score_history.is_empty());
}

#[tokio::test]
async fn test_combined_view_uses_latest_evaluations_of_users_employee() {
    let h = Harness::new();
    let (captain, _) = h.captain("0500000004", JobRole::CustomerChampion, Site::Airport).await;
    let seller = h
        .actor("0500000005", JobRole::CustomerChampion, Site::Airport, false)
        .await;
    let employee = seller.employee.clone().unwrap();

    for week in 0..12u32 {
        let day = date(2025, 1, 6) + chrono::Duration::weeks(i64::from(week));
        let raw = if week < 2 { "0" } else { "7" };
        h.evaluations
            .submit_weekly(
                &captain,
                &[ScoreEntry {
                    attendant: employee.id,
                    raw_score: dec(raw),
                }],
                day,
            )
            .await
            .unwrap();
    }

    let window = SummaryWindow {
        year: 2025,
        last_n_days: 30,
        today: date(2025, 4, 2),
    };
    let generated_at = Utc.with_ymd_and_hms(2025, 4, 2, 9, 0, 0).unwrap();
    let combined = h
        .summaries
        .combined(seller.user.id, window, generated_at)
        .await
        .unwrap();

    // The two zero scores are the oldest and fall outside the last ten
    assert_eq!(combined.performance_history.len(), 10);
    assert_eq!(combined.average_score, dec("100.00"));
    assert_eq!(combined.meta.current_quarter, Quarter::Q2);
    assert_eq!(combined.breakdown.average_performance, dec("0"));
}

#[tokio::test]
async fn test_site_summaries() {
    let h = Harness::new();
    let boss = h.actor("0500000006", JobRole::Manager, Site::Ofankor, false).await;
    let (fuel_captain, fc) = h.captain("0500000007", JobRole::CustomerChampion, Site::Ofankor).await;
    let (shop_captain, sc) = h.captain("0500000008", JobRole::ServiceChampion, Site::Ofankor).await;

    h.targets
        .set_pump_target(&boss, Site::Ofankor, Pump::Pump1, dec("100"))
        .await
        .unwrap();
    h.targets
        .set_pump_target(&boss, Site::Ofankor, Pump::Pump2, dec("100"))
        .await
        .unwrap();
    h.targets
        .set_shop_target(&boss, Site::Ofankor, dec("10"))
        .await
        .unwrap();

    // June has 30 days: fuel target 6000, shop target 300
    h.sales
        .record_fuel(&fuel_captain, fuel(date(2025, 6, 3), fc.id, "3000"))
        .await
        .unwrap();
    h.sales
        .record_fuel(&fuel_captain, fuel(date(2025, 5, 3), fc.id, "1500"))
        .await
        .unwrap();
    h.sales
        .record_shop(
            &shop_captain,
            ShopSalesEntry {
                date: date(2025, 6, 3),
                captain: sc.id,
                sales: dec("75"),
            },
        )
        .await
        .unwrap();

    let today = date(2025, 6, 15);
    let fuel_summary = h.summaries.fuel_site_summary(&boss, 2025, today).await.unwrap();
    assert_eq!(fuel_summary.current_performance.raw_score, dec("3000"));
    assert_eq!(fuel_summary.current_performance.target, dec("6000"));
    assert_eq!(fuel_summary.current_performance.performance, dec("50.00"));
    assert_eq!(fuel_summary.captain_performance.len(), 1);
    assert_eq!(fuel_summary.captain_performance[0].target, dec("6000"));
    assert_eq!(fuel_summary.captain_performance[0].performance, dec("100.00"));
    assert_eq!(fuel_summary.monthly_summary[5].growth, dec("1.00"));

    let shop_summary = h.summaries.shop_site_summary(&boss, 2025, today).await.unwrap();
    assert_eq!(shop_summary.current_performance.target, dec("300"));
    assert_eq!(shop_summary.current_performance.performance, dec("25.00"));
    assert_eq!(shop_summary.captain_performance.len(), 1);
    assert_eq!(shop_summary.captain_performance[0].target, dec("150"));
    assert_eq!(shop_summary.captain_performance[0].performance, dec("50.00"));
}

#[tokio::test]
async fn test_site_summary_needs_employee_profile() {
    let h = Harness::new();
    let user = h.user("0500000009", false).await;
    let actor = Actor {
        user,
        employee: None,
    };

    let err = h
        .summaries
        .fuel_site_summary(&actor, 2025, date(2025, 6, 1))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::validation("User site not found."));
}
