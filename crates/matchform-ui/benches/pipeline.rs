use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matchform_ui::{
    apply_matched_transform_effect, AnimationSpec, ColumnSpec, Modifier, Namespace, Node, Size,
    UiHost,
};

const SECTION_COUNT: usize = 4;
const ROWS_PER_SECTION_SAMPLES: &[usize] = &[16, 64];
const ROOT_SIZE: Size = Size {
    width: 1080.0,
    height: 1920.0,
};
const FRAME_NANOS: u64 = 16_666_667;

/// Sections of rows; row 0 of every section carries a matched effect that
/// moves to the last row when `flipped`.
fn pipeline_content(
    sections: usize,
    rows_per_section: usize,
    flipped: bool,
    namespace: &Namespace,
) -> Node {
    Node::column(
        ColumnSpec::default(),
        (0..sections).map(|section| {
            let rows = (0..rows_per_section).map(move |row| {
                let label = format!("Item {section}-{row}");
                let leaf = Node::leaf(label, Size::new(120.0 + row as f32, 18.0))
                    .modifier(Modifier::empty().padding(2.0));
                let holder = if flipped { rows_per_section - 1 } else { 0 };
                if row == holder {
                    apply_matched_transform_effect(leaf.key((section, row)), section, namespace)
                } else {
                    leaf
                }
            });
            Node::column(
                ColumnSpec::default().spacing(4.0),
                std::iter::once(Node::leaf(format!("Section {section}"), Size::new(200.0, 24.0)))
                    .chain(rows.collect::<Vec<_>>()),
            )
            .modifier(Modifier::empty().fill_max_width())
        }),
    )
}

fn ui_object_count(sections: usize, rows_per_section: usize) -> usize {
    1 + sections * (2 + rows_per_section)
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_layout");
    for &rows_per_section in ROWS_PER_SECTION_SAMPLES {
        group.bench_with_input(
            BenchmarkId::new("ui_objects", ui_object_count(SECTION_COUNT, rows_per_section)),
            &rows_per_section,
            |b, &rows_per_section| {
                let mut host = UiHost::new();
                let namespace = host.namespace().clone();
                host.render(pipeline_content(SECTION_COUNT, rows_per_section, false, &namespace));
                b.iter(|| {
                    let layout = host.compute_layout(ROOT_SIZE).expect("layout");
                    black_box(host.draw(&layout));
                });
            },
        );
    }
    group.finish();
}

fn bench_transition_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_transition_frame");
    for &rows_per_section in ROWS_PER_SECTION_SAMPLES {
        group.bench_with_input(
            BenchmarkId::new("ui_objects", ui_object_count(SECTION_COUNT, rows_per_section)),
            &rows_per_section,
            |b, &rows_per_section| {
                let mut host = UiHost::new();
                let namespace = host.namespace().clone();
                host.render(pipeline_content(SECTION_COUNT, rows_per_section, false, &namespace));
                host.frame(ROOT_SIZE, 0).expect("first frame");
                // An hour long, so every iteration lands mid-transition.
                host.render_animated(
                    AnimationSpec::linear(3_600_000),
                    pipeline_content(SECTION_COUNT, rows_per_section, true, &namespace),
                );
                let mut now = FRAME_NANOS;
                b.iter(|| {
                    now += FRAME_NANOS;
                    black_box(host.frame(ROOT_SIZE, now).expect("frame"));
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_transition_frame);
criterion_main!(benches);
