use gapminder_chart::api::{ChartSession, ChartSessionConfig};
use gapminder_chart::core::Viewport;
use gapminder_chart::dataset::load_csv_path;
use gapminder_chart::render::{
    CirclePrimitive, Color, RenderFrame, Renderer, SvgRenderer, TextHAlign, TextPrimitive,
};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/gapminder_sample.csv");

#[test]
fn frame_is_written_as_a_standalone_document() {
    let frame = RenderFrame::new(Viewport::new(200, 100))
        .with_offset(10.0, 20.0)
        .with_opacity(0.5)
        .with_circle(CirclePrimitive {
            cx: 40.0,
            cy: 50.0,
            radius: 3.0,
            fill_color: Color::WHITE,
            stroke_color: Color::MARK_STROKE,
            stroke_width: 2.0,
        })
        .with_text(
            TextPrimitive::new("Côte d'Ivoire & co", 5.0, 6.0, 16.0, Color::BLACK, TextHAlign::Left)
                .rotated(-90.0),
        );

    let mut renderer = SvgRenderer::new();
    renderer.render(&frame).expect("render");
    let svg = renderer.document();

    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"200\" height=\"100\""));
    assert!(svg.contains("translate(10.00,20.00)\" opacity=\"0.500\""));
    assert!(svg.contains(
        "<circle cx=\"40.00\" cy=\"50.00\" r=\"3.00\" fill=\"#ffffff\" stroke=\"#025d8c\""
    ));
    assert!(svg.contains("rotate(-90.00)"));
    assert!(svg.contains("Côte d'Ivoire &amp; co"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(renderer.frames_rendered(), 1);
}

#[test]
fn invalid_frames_are_rejected_without_touching_the_document() {
    let mut renderer = SvgRenderer::new();
    let bad = RenderFrame::new(Viewport::new(0, 100));
    assert!(renderer.render(&bad).is_err());
    assert!(renderer.document().is_empty());
    assert_eq!(renderer.frames_rendered(), 0);
}

#[test]
fn fixture_session_renders_main_chart_and_tooltip() {
    let (dataset, _) = load_csv_path(FIXTURE).expect("fixture");
    let mut session = ChartSession::new(
        SvgRenderer::new(),
        SvgRenderer::new(),
        ChartSessionConfig::default(),
        dataset,
    )
    .expect("session");

    let mark = session.scatter().visible_marks().next().copied().expect("visible mark");
    session.pointer_move(mark.cx, mark.cy).expect("hover");
    session.step_tooltip(200.0);
    session.render().expect("render");

    let (main, overlay) = session.into_renderers();
    let main = main.into_document();
    assert_eq!(main.matches("<circle").count(), 4);
    assert!(main.contains("Countries by Fertility vs Life Expectancy (1980)"));

    let overlay = overlay.into_document();
    assert!(overlay.contains("<path d=\"M"));
    assert!(overlay.contains("stroke=\"#4682b4\""));
    assert!(overlay.contains("Population Over Time For Albania"));
    assert!(overlay.contains("opacity=\"0.900\""));
}
