//! Builds a small Gantt chart scene and prints what a painter would draw.
//!
//! Run with: RUST_LOG=chart_canvas=trace cargo run --example gantt --features tracing

use std::rc::Rc;

use chart_canvas::{
    Canvas, Color, Font, FontChooser, Label, Line, Painter, Polygon, Rectangle, Rhombus, Shape,
    TextGroup, TextMetrics, TextPaint,
};
use tracing_subscriber::EnvFilter;

struct Task {
    name: &'static str,
    start: i32,
    days: i32,
}

struct Metrics;

impl TextMetrics for Metrics {
    fn text_length(&self, text: &str) -> i32 {
        text.chars().count() as i32 * 6
    }

    fn text_height(&self, _text: &str) -> Option<i32> {
        Some(10)
    }
}

struct Styles {
    base: u32,
}

impl FontChooser for Styles {
    fn font(&self, style: &str) -> Font {
        Font::new(if style == "header" { "Sans Bold" } else { "Sans" }, self.base)
    }

    fn color(&self, _style: &str) -> Color {
        Color::BLACK
    }

    fn margin_top(&self, _style: &str) -> i32 {
        2
    }

    fn text_height(&self, _style: &str) -> i32 {
        self.base as i32
    }

    fn margin_bottom(&self, _style: &str) -> i32 {
        2
    }

    fn base_font_size(&self) -> u32 {
        self.base
    }

    fn decrease_base_font_size(&mut self) -> u32 {
        self.base = self.base.saturating_sub(1);
        self.base
    }
}

struct Printer {
    styles: Styles,
    column_width: i32,
}

impl Painter for Printer {
    fn pre_paint(&mut self) {
        println!("-- layer --");
    }

    fn paint_rectangle(&mut self, shape: &Shape, r: &Rectangle) {
        let task = shape.model::<Task>().map(|t| t.name).unwrap_or("-");
        println!("bar   {:>4},{:<4} {:>3}x{:<3} {task}", r.left_x(), r.top_y(), r.width(), r.height());
    }

    fn paint_line(&mut self, _shape: &Shape, line: &Line) {
        println!("link  {} -> {}", line.start(), line.finish());
    }

    fn paint_polygon(&mut self, _shape: &Shape, polygon: &Polygon) {
        println!("poly  {:?}", polygon.points());
    }

    fn paint_rhombus(&mut self, _shape: &Shape, rhombus: &Rhombus) {
        println!("mile  {},{}", rhombus.left_x(), rhombus.top_y());
    }

    fn paint_text(&mut self, mut text: TextPaint<'_>) {
        let width = self.column_width;
        let fitting = text.labels(&Metrics).iter().position(|l| l.width() <= width);
        if let Some(i) = fitting {
            if let Err(e) = text.show_label(i) {
                eprintln!("label: {e}");
            }
        }
        let shown = text
            .text()
            .cached_labels()
            .and_then(|ls| ls.iter().find(|l| l.is_visible()))
            .map(Label::text)
            .unwrap_or("");
        println!("text  {:?}", shown);
    }

    fn paint_text_group(&mut self, group: &mut TextGroup) {
        let fonts = group.fit_fonts(&mut self.styles);
        let sizes: Vec<_> = fonts.iter().map(|f| f.size).collect();
        println!("group {} lines at sizes {:?}", group.line_count(), sizes);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let tasks = [
        Rc::new(Task { name: "Design", start: 0, days: 5 }),
        Rc::new(Task { name: "Implementation", start: 5, days: 10 }),
        Rc::new(Task { name: "Release", start: 15, days: 0 }),
    ];

    let mut chart = Canvas::new();
    let [bars, labels] = chart.create_layers(2) else {
        unreachable!("create_layers(2) returns two layers");
    };

    bars.set_offset(0, 30);
    labels.set_offset(0, 30);
    for (row, task) in tasks.iter().enumerate() {
        let y = row as i32 * 20;
        let id = if task.days == 0 {
            bars.create_rhombus(task.start * 10 - 5, y, 10, 10)
        } else {
            bars.create_rectangle(task.start * 10, y, task.days * 10, 10)
        };
        bars.bind(id, task).expect("shape was just created");

        let name = task.name;
        labels.create_text_with(task.start * 10, y + 10, move |m: &dyn TextMetrics| {
            let short: String = name.chars().take(4).collect();
            vec![
                Label::new(name, m.text_length(name), m.text_height(name)),
                Label::new(short.clone(), m.text_length(&short), m.text_height(&short)),
            ]
        });
    }
    bars.create_line(50, 5, 50, 25);

    chart.create_text_group(0, 28, 28, ["header", "body"]);

    let mut printer = Printer {
        styles: Styles { base: 14 },
        column_width: 50,
    };
    chart.paint_all(&mut printer);

    if let Some(hit) = chart.layer(0).ok().and_then(|l| l.primitive_at(80, 55)) {
        let name = hit.model::<Task>().map(|t| t.name).unwrap_or("?");
        println!("hit at (80, 55): {name}");
    }
}
