//! Integration tests for bondopt-portfolio.
//!
//! End-to-end screening, summary and optimization runs over small
//! universes with known answers.

use approx::assert_relative_eq;
use bondopt_core::{Bond, ClassLevel, Classification, Date, TargetMetric, Universe};
use bondopt_portfolio::prelude::*;
use bondopt_portfolio::{list_categories, PortfolioError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn quarter_end() -> Date {
    Date::from_ymd(2023, 3, 31).unwrap()
}

fn year_end() -> Date {
    Date::from_ymd(2022, 12, 30).unwrap()
}

#[allow(clippy::too_many_arguments)]
fn create_bond(
    alias: &str,
    sector: &str,
    rating: &str,
    date: Date,
    duration: f64,
    mv: Decimal,
    oas: f64,
    ytm: f64,
) -> Bond {
    Bond::builder()
        .alias(alias)
        .classification(Classification::new("Corporate", sector, "Senior", "Fixed"))
        .rating(rating)
        .effective_date(date)
        .effective_duration(duration)
        .market_value(mv)
        .oas(oas)
        .ytm(ytm)
        .build()
        .unwrap()
}

/// Three bonds with durations 2, 4, 6 and OAS 1%, 3%, 2%, each in its own
/// sector.
fn three_bond_universe() -> Universe {
    Universe::new(vec![
        create_bond("bond1", "Energy", "A", quarter_end(), 2.0, dec!(1_000_000), 1.0, 4.0),
        create_bond("bond2", "Utility", "A", quarter_end(), 4.0, dec!(2_000_000), 3.0, 5.0),
        create_bond("bond3", "Banking", "A", quarter_end(), 6.0, dec!(1_500_000), 2.0, 6.0),
    ])
    .unwrap()
}

/// A two-date universe with shared sectors.
fn market_universe() -> Universe {
    let mut bonds = Vec::new();
    for (date, shift) in [(year_end(), 0.0), (quarter_end(), 0.25)] {
        let suffix = date.to_string();
        bonds.extend([
            create_bond(&format!("XOM-{suffix}"), "Energy", "AA", date, 5.5, dec!(900_000), 1.10 + shift, 4.6),
            create_bond(&format!("CVX-{suffix}"), "Energy", "AA", date, 7.2, dec!(700_000), 1.35 + shift, 4.9),
            create_bond(&format!("DUK-{suffix}"), "Utility", "A", date, 9.8, dec!(500_000), 1.60 + shift, 5.2),
            create_bond(&format!("NEE-{suffix}"), "Utility", "BBB", date, 3.1, dec!(1_200_000), 1.95 + shift, 5.6),
            create_bond(&format!("JPM-{suffix}"), "Banking", "A", date, 4.4, dec!(2_000_000), 1.25 + shift, 5.0),
            create_bond(&format!("BAC-{suffix}"), "Banking", "A", date, 6.6, dec!(1_100_000), 1.45 + shift, 5.3),
        ]);
    }
    Universe::new(bonds).unwrap()
}

fn wide_open(delta: f64) -> OptimizationParams {
    OptimizationParams::new(TargetMetric::Oas, quarter_end())
        .with_sector_cap(1.0)
        .with_max_individual_weight(0.5)
        .with_duration_delta(delta)
}

// =============================================================================
// OPTIMIZER
// =============================================================================

#[test]
fn test_duration_band_beyond_reach_is_infeasible() {
    // D = 12 and delta = 1 demand a weighted duration of at least 11, but
    // the largest reachable value is 0.5 * 6 + 0.5 * 4 = 5.
    let result = optimize(&three_bond_universe(), &wide_open(1.0), &OptimizerConfig::default())
        .unwrap();

    assert_eq!(result.status, SolveStatus::Infeasible);
    assert!(result.allocation().is_empty());
    assert_relative_eq!(result.duration_target, 12.0);
}

#[test]
fn test_highest_spread_bonds_filled_to_cap() {
    let result = optimize(&three_bond_universe(), &wide_open(8.0), &OptimizerConfig::default())
        .unwrap();

    assert!(result.is_optimal());
    let allocation = result.allocation_map();
    assert_eq!(allocation.len(), 2);
    assert_relative_eq!(allocation["bond2"], 0.5, epsilon = 1e-7);
    assert_relative_eq!(allocation["bond3"], 0.5, epsilon = 1e-7);
    assert!(!allocation.contains_key("bond1"));
    assert_relative_eq!(result.objective_value.unwrap(), 2.5, epsilon = 1e-7);
    assert_relative_eq!(result.portfolio_duration(), 5.0, epsilon = 1e-7);
}

#[test]
fn test_duration_floor_shifts_weight_to_long_bond() {
    // D = 12 and delta = 8 give a floor of 4. Filling the two short
    // high-spread bonds would leave duration at 1, so part of the budget
    // moves to the long bond.
    let universe = Universe::new(vec![
        create_bond("short_a", "Energy", "A", quarter_end(), 1.0, dec!(1_000_000), 5.0, 6.0),
        create_bond("short_b", "Utility", "A", quarter_end(), 1.0, dec!(1_000_000), 4.0, 5.0),
        create_bond("long_c", "Banking", "A", quarter_end(), 10.0, dec!(1_000_000), 1.0, 4.0),
    ])
    .unwrap();

    let result = optimize(&universe, &wide_open(8.0), &OptimizerConfig::default()).unwrap();

    assert!(result.is_optimal());
    assert_relative_eq!(result.weight("short_a").unwrap(), 0.5, epsilon = 1e-7);
    assert_relative_eq!(result.weight("short_b").unwrap(), 1.0 / 6.0, epsilon = 1e-7);
    assert_relative_eq!(result.weight("long_c").unwrap(), 1.0 / 3.0, epsilon = 1e-7);
    assert_relative_eq!(result.objective_value.unwrap(), 3.5, epsilon = 1e-7);
    assert_relative_eq!(result.portfolio_duration(), 4.0, epsilon = 1e-7);
}

#[test]
fn test_ytm_target_changes_ranking() {
    let params = wide_open(8.0);
    let params = OptimizationParams {
        target: TargetMetric::Ytm,
        ..params
    };
    let result = optimize(&three_bond_universe(), &params, &OptimizerConfig::default()).unwrap();

    let allocation = result.allocation_map();
    assert_relative_eq!(allocation["bond3"], 0.5, epsilon = 1e-7);
    assert_relative_eq!(allocation["bond2"], 0.5, epsilon = 1e-7);
    assert_relative_eq!(result.objective_value.unwrap(), 5.5, epsilon = 1e-7);
}

#[test]
fn test_zero_sector_cap_with_positive_floor_is_infeasible() {
    let params = wide_open(3.0).with_sector_cap(0.0);
    let result = optimize(&three_bond_universe(), &params, &OptimizerConfig::default()).unwrap();
    assert!(result.is_infeasible());
}

#[test]
fn test_sector_cap_binds() {
    let universe = market_universe();
    let params = OptimizationParams::new(TargetMetric::Oas, quarter_end())
        .with_sector_cap(0.3)
        .with_max_individual_weight(0.2)
        .with_duration_delta(40.0);
    let result = optimize(&universe, &params, &OptimizerConfig::default()).unwrap();

    assert!(result.is_optimal());
    for (sector, exposure) in result.category_exposures() {
        assert!(exposure <= 0.3 + 1e-7, "{sector} exposure {exposure} above cap");
    }
    assert!(result.total_weight() <= 1.0 + 1e-7);
    for (alias, weight) in result.allocation() {
        assert!(weight <= 0.2 + 1e-7, "{alias} weight {weight} above cap");
        assert!(alias.ends_with("2023-03-31"));
    }
    // Three sectors capped at 0.3 each.
    assert_relative_eq!(result.total_weight(), 0.9, epsilon = 1e-6);
}

#[test]
fn test_candidates_restricted_to_date() {
    let universe = market_universe();
    let params = OptimizationParams::new(TargetMetric::Oas, year_end()).with_duration_delta(40.0);
    let problem = PortfolioProblem::build(&universe, &params, &OptimizerConfig::default()).unwrap();

    assert_eq!(problem.candidates().len(), 6);
    assert!(problem
        .candidates()
        .bonds()
        .iter()
        .all(|b| b.effective_date == year_end()));
    assert_relative_eq!(
        problem.duration_target(),
        5.5 + 7.2 + 9.8 + 3.1 + 4.4 + 6.6,
        epsilon = 1e-12
    );
}

#[test]
fn test_portfolio_duration_stays_in_band() {
    let universe = market_universe();
    let params = OptimizationParams::new(TargetMetric::Oas, quarter_end())
        .with_sector_cap(0.5)
        .with_max_individual_weight(0.25)
        .with_duration_delta(33.0);
    let result = optimize(&universe, &params, &OptimizerConfig::default()).unwrap();

    assert!(result.is_optimal());
    let (lower, upper) = result.duration_band();
    let duration = result.portfolio_duration();
    assert!(duration >= lower - 1e-7 && duration <= upper + 1e-7);
}

#[test]
fn test_optimization_is_deterministic() {
    let universe = market_universe();
    let params = OptimizationParams::new(TargetMetric::Oas, quarter_end()).with_duration_delta(40.0);
    let first = optimize(&universe, &params, &OptimizerConfig::default()).unwrap();
    let second = optimize(&universe, &params, &OptimizerConfig::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_indicator_collision_fails_at_build() {
    let mut bonds: Vec<Bond> = three_bond_universe().bonds().to_vec();
    bonds.push(create_bond("bond4", "YTM", "A", year_end(), 1.0, dec!(10), 0.5, 3.0));
    let universe = Universe::new(bonds).unwrap();

    // The colliding bond is on another date; expansion still covers it.
    let err = optimize(&universe, &wide_open(8.0), &OptimizerConfig::default()).unwrap_err();
    assert_eq!(err, PortfolioError::IndicatorCollision { name: "YTM".into() });
}

#[test]
fn test_classification_field_is_configurable() {
    let config = OptimizerConfig::new().with_classification_field(ClassLevel::One);
    let params = wide_open(10.0).with_sector_cap(0.6);
    let result = optimize(&three_bond_universe(), &params, &config).unwrap();

    // Every bond shares CLASS_1, so one cap covers the whole book.
    assert_eq!(result.categories, vec!["Corporate".to_string()]);
    assert_relative_eq!(result.total_weight(), 0.6, epsilon = 1e-7);
}

#[test]
fn test_request_pipeline() {
    let universe = three_bond_universe();
    let request = OptimizationRequest {
        sector_cap: Some(1.0),
        max_individual_weight: Some(0.5),
        duration_delta: Some(8.0),
        ..Default::default()
    };
    let params = request.resolve(&OptimizationDefaults::default()).unwrap();
    let result = optimize(&universe, &params, &OptimizerConfig::default()).unwrap();
    assert_eq!(result.allocation().len(), 2);

    let bad = OptimizationRequest {
        sector_cap: Some(-0.1),
        ..Default::default()
    };
    assert!(bad.resolve(&OptimizationDefaults::default()).unwrap_err().is_validation());
}

// =============================================================================
// SCREENING AND SUMMARY
// =============================================================================

#[test]
fn test_unknown_rating_gives_empty_summary() {
    let universe = market_universe();
    let request = SummaryRequest {
        classification: [
            "Corporate".into(),
            "Energy".into(),
            "Senior".into(),
            "Fixed".into(),
        ],
        rating: "CCC".into(),
        duration_min: 0.0,
        duration_max: 30.0,
    };
    let selector = request.validate().unwrap();

    let subset = filter(&universe, &selector);
    assert!(subset.is_empty());

    let summary = summarize(&subset).unwrap();
    assert!(summary.is_empty());
    assert_eq!(summary.market_value, None);
    assert!(summary.oas.is_none());
}

#[test]
fn test_segment_summary_across_dates() {
    let universe = market_universe();
    let selector = SegmentSelector::new(
        Classification::new("Corporate", "Energy", "Senior", "Fixed"),
        "AA",
        DurationBand::new(5.0, 8.0).unwrap(),
    );
    let summary = summarize_segment(&universe, &selector).unwrap();

    assert_eq!(summary.count, 4);
    assert_eq!(summary.market_value, Some(dec!(3_200_000)));
    let oas = summary.oas.unwrap();
    assert_relative_eq!(oas.min, 1.10, epsilon = 1e-12);
    assert_relative_eq!(oas.max, 1.60, epsilon = 1e-12);
    assert_relative_eq!(oas.median, 1.35, epsilon = 1e-12);
}

#[test]
fn test_category_listing() {
    let listing = list_categories(&market_universe());
    assert_eq!(listing.level(ClassLevel::Two), ["Energy", "Utility", "Banking"]);
    assert_eq!(listing.ratings, vec!["AA", "A", "BBB"]);
}
