use approx::assert_relative_eq;
use gapminder_chart::api::{AxisMapping, X_DOMAIN_PADDING, Y_DOMAIN_PADDING};
use gapminder_chart::core::{AxesLimits, ChartLayout, find_min_max};
use gapminder_chart::dataset::{CountryRecord, RecordField};
use proptest::prelude::*;

fn main_mapping(limits: AxesLimits) -> AxisMapping {
    AxisMapping::build(
        limits,
        RecordField::Fertility,
        RecordField::LifeExpectancy,
        ChartLayout::MAIN,
    )
    .expect("valid mapping")
}

#[test]
fn domain_edges_land_on_plot_edges() {
    let mapping = main_mapping(AxesLimits {
        x_min: 2.0,
        x_max: 4.0,
        y_min: 60.0,
        y_max: 70.0,
    });

    let x = mapping.x_scale();
    assert_relative_eq!(x.map(2.0 - X_DOMAIN_PADDING), 50.0);
    assert_relative_eq!(x.map(4.0 + X_DOMAIN_PADDING), 1450.0);

    let y = mapping.y_scale();
    assert_relative_eq!(y.map(70.0 + Y_DOMAIN_PADDING), 50.0);
    assert_relative_eq!(y.map(60.0 - Y_DOMAIN_PADDING), 750.0);
}

#[test]
fn record_is_mapped_through_its_fields() {
    let mapping = main_mapping(AxesLimits {
        x_min: 2.0,
        x_max: 4.0,
        y_min: 60.0,
        y_max: 70.0,
    });
    let record = CountryRecord::new("A", "1980", 3.0, 65.0, 1.0);

    // Midpoints of both padded domains.
    let (x, y) = mapping.map_point(&record);
    assert_relative_eq!(x, 750.0);
    assert_relative_eq!(y, 400.0);
}

#[test]
fn undefined_limits_are_rejected() {
    let limits = find_min_max(&[], &[]);
    let result = AxisMapping::build(
        limits,
        RecordField::Fertility,
        RecordField::LifeExpectancy,
        ChartLayout::MAIN,
    );
    assert!(result.is_err());
}

#[test]
fn single_valued_series_still_has_a_usable_domain() {
    let mapping = main_mapping(find_min_max(&[3.0], &[70.0]));
    assert_eq!(mapping.x_scale().domain(), (2.5, 3.5));
    assert_eq!(mapping.y_scale().domain(), (75.0, 65.0));
}

#[test]
fn drill_down_layout_uses_its_own_margins() {
    let mapping = AxisMapping::build(
        find_min_max(&[1970.0, 1990.0], &[1.0, 3.0]),
        RecordField::Year,
        RecordField::Population,
        ChartLayout::DRILL_DOWN,
    )
    .expect("valid mapping");

    assert_eq!(mapping.x_scale().range(), (70.0, 430.0));
    assert_eq!(mapping.y_scale().range(), (70.0, 430.0));
    let scene = mapping.axis_scene(ChartLayout::DRILL_DOWN);
    assert!(scene.texts.iter().any(|text| text.text == "1,980"));
}

proptest! {
    #[test]
    fn x_mapping_is_increasing_and_y_mapping_is_decreasing(
        x_min in 0.0f64..5.0,
        x_span in 0.1f64..5.0,
        y_min in 30.0f64..60.0,
        y_span in 0.1f64..30.0,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0
    ) {
        prop_assume!((a - b).abs() > 1e-6);
        let limits = AxesLimits {
            x_min,
            x_max: x_min + x_span,
            y_min,
            y_max: y_min + y_span,
        };
        let mapping = main_mapping(limits);
        let (low, high) = if a < b { (a, b) } else { (b, a) };

        let x_low = mapping.x_scale().map(x_min + x_span * low);
        let x_high = mapping.x_scale().map(x_min + x_span * high);
        prop_assert!(x_low < x_high);

        let y_low = mapping.y_scale().map(y_min + y_span * low);
        let y_high = mapping.y_scale().map(y_min + y_span * high);
        prop_assert!(y_high < y_low);
    }
}
