use gapminder_chart::api::{
    AxisMapping, ChartSession, ChartSessionConfig, MarkStyle, apply_year_filter, build_scatter,
};
use gapminder_chart::core::{ChartLayout, find_min_max};
use gapminder_chart::dataset::{CountryRecord, Dataset, RecordField, load_csv_str};
use gapminder_chart::render::NullRenderer;

fn two_year_dataset() -> Dataset {
    Dataset::from_records(vec![
        CountryRecord::new("A", "1980", 2.0, 70.0, 1.0),
        CountryRecord::new("B", "1990", 4.0, 60.0, 4.0),
        CountryRecord::new("C", "1980", 3.0, 65.0, 2.0),
    ])
}

fn mapping_for(dataset: &Dataset) -> AxisMapping {
    let limits = find_min_max(
        &dataset.column(RecordField::Fertility),
        &dataset.column(RecordField::LifeExpectancy),
    );
    AxisMapping::build(
        limits,
        RecordField::Fertility,
        RecordField::LifeExpectancy,
        ChartLayout::MAIN,
    )
    .expect("valid mapping")
}

#[test]
fn only_marks_of_the_selected_year_are_visible() {
    let dataset = two_year_dataset();
    let mut layer = build_scatter(&dataset, &mapping_for(&dataset), MarkStyle::default());

    let visible = apply_year_filter(layer.marks_mut(), &dataset, "1980");

    assert_eq!(visible, 2);
    let rows: Vec<usize> = layer.visible_marks().map(|mark| mark.row).collect();
    assert_eq!(rows, vec![0, 2]);
    assert!(!layer.marks()[1].visible);
}

#[test]
fn filtering_twice_leaves_the_marks_unchanged() {
    let dataset = two_year_dataset();
    let mut layer = build_scatter(&dataset, &mapping_for(&dataset), MarkStyle::default());

    apply_year_filter(layer.marks_mut(), &dataset, "1990");
    let once = layer.marks().to_vec();
    apply_year_filter(layer.marks_mut(), &dataset, "1990");

    assert_eq!(layer.marks(), once.as_slice());
}

#[test]
fn unknown_year_hides_every_mark() {
    let dataset = two_year_dataset();
    let mut layer = build_scatter(&dataset, &mapping_for(&dataset), MarkStyle::default());

    assert_eq!(apply_year_filter(layer.marks_mut(), &dataset, "2050"), 0);
    assert!(layer.circles().is_empty());
}

#[test]
fn year_match_is_textual() {
    let dataset = two_year_dataset();
    let mut layer = build_scatter(&dataset, &mapping_for(&dataset), MarkStyle::default());

    assert_eq!(apply_year_filter(layer.marks_mut(), &dataset, "1980.0"), 0);
}

#[test]
fn hidden_marks_keep_their_geometry() {
    let dataset = two_year_dataset();
    let mut layer = build_scatter(&dataset, &mapping_for(&dataset), MarkStyle::default());
    let before = layer.marks()[1];

    apply_year_filter(layer.marks_mut(), &dataset, "1980");
    let after = layer.marks()[1];

    assert_eq!((before.cx, before.cy, before.radius), (after.cx, after.cy, after.radius));
}

#[test]
fn loaded_rows_are_filtered_to_the_selected_year() {
    let input = "country,year,fertility,life_expectancy,population\n\
                 A,1980,2.5,70,2000000\n\
                 B,1990,4,60,500000\n";
    let (dataset, _) = load_csv_str(input).expect("loads");
    assert_eq!(dataset.records()[0].population, 2.0);
    assert_eq!(dataset.records()[1].population, 0.5);

    let mut layer = build_scatter(&dataset, &mapping_for(&dataset), MarkStyle::default());
    assert_eq!(apply_year_filter(layer.marks_mut(), &dataset, "1980"), 1);
    let visible: Vec<&str> = layer
        .visible_marks()
        .filter_map(|mark| dataset.get(mark.row))
        .map(|record| record.country.as_str())
        .collect();
    assert_eq!(visible, vec!["A"]);

    let mut session = ChartSession::new(
        NullRenderer::default(),
        NullRenderer::default(),
        ChartSessionConfig::default(),
        dataset,
    )
    .expect("session");
    assert_eq!(session.show_year("1980"), 1);
    assert_eq!(session.visible_countries().collect::<Vec<_>>(), vec!["A"]);
    assert_eq!(session.main_frame().circles.len(), 1);
}
