use outline_grid::{LiveModel, OutlineEditor, Patch, synchronize};
use std::time::{Duration, Instant};
use tdoc::{Document, Paragraph, Span};

/// Performance benchmark suite for outline synchronization
///
/// Run with: cargo test --release --bench performance -- --nocapture
///
/// This measures:
/// - Growth passes over ragged outlines (wrap + pad every row)
/// - No-op passes over uniform outlines (the per-keystroke hot path)
/// - Patch build + commit against direct live mutation
/// - Full editor edit cycles (typing + structural commands)
const SMALL_OUTLINE_ROWS: usize = 10;
const MEDIUM_OUTLINE_ROWS: usize = 100;
const LARGE_OUTLINE_ROWS: usize = 1000;
const HUGE_OUTLINE_ROWS: usize = 10000;

const ITERATIONS: usize = 100;

fn text_paragraph(text: &str) -> Paragraph {
    Paragraph::new_text().with_content(vec![Span::new_text(text)])
}

/// Outline where every row already carries `cells_per_row` cells.
fn create_uniform_outline(rows: usize, cells_per_row: usize) -> Document {
    let entries = (0..rows)
        .map(|row| {
            let mut entry = vec![text_paragraph(&format!("Row {}", row))];
            if cells_per_row > 0 {
                let cells = (0..cells_per_row)
                    .map(|cell| vec![text_paragraph(&format!("r{}c{}", row, cell))])
                    .collect::<Vec<_>>();
                entry.push(Paragraph::new_unordered_list().with_entries(cells));
            }
            entry
        })
        .collect::<Vec<_>>();
    Document::new().with_paragraphs(vec![
        Paragraph::new_unordered_list().with_entries(entries),
    ])
}

/// Outline where only row 0 has cells, so a pass from row 0 must wrap and
/// pad every other row.
fn create_ragged_outline(rows: usize, trigger_cells: usize) -> Document {
    let entries = (0..rows)
        .map(|row| {
            let mut entry = vec![text_paragraph(&format!("Row {}", row))];
            if row == 0 {
                let cells = (0..trigger_cells)
                    .map(|cell| vec![text_paragraph(&format!("c{}", cell))])
                    .collect::<Vec<_>>();
                entry.push(Paragraph::new_unordered_list().with_entries(cells));
            }
            entry
        })
        .collect::<Vec<_>>();
    Document::new().with_paragraphs(vec![
        Paragraph::new_unordered_list().with_entries(entries),
    ])
}

struct BenchmarkResult {
    name: String,
    iterations: usize,
    total_duration: Duration,
    avg_duration: Duration,
    min_duration: Duration,
    max_duration: Duration,
}

impl BenchmarkResult {
    fn print(&self) {
        println!("\n{}", "=".repeat(70));
        println!("Benchmark: {}", self.name);
        println!("{}", "=".repeat(70));
        println!("Iterations:     {}", self.iterations);
        println!("Total time:     {:?}", self.total_duration);
        println!("Average:        {:?}", self.avg_duration);
        println!("Min:            {:?}", self.min_duration);
        println!("Max:            {:?}", self.max_duration);

        // A pass runs inside the key handler, so anything slow here is lag
        // on every structural keystroke.
        if self.avg_duration.as_millis() > 100 {
            println!("\n⚠️  WARNING: Average duration > 100ms (user-perceptible lag)");
        } else if self.avg_duration.as_millis() > 16 {
            println!("\n⚠️  WARNING: Average duration > 16ms (may drop frames)");
        }
    }
}

fn benchmark<F>(name: &str, iterations: usize, mut f: F) -> BenchmarkResult
where
    F: FnMut(),
{
    let mut durations = Vec::with_capacity(iterations);

    // Warmup
    for _ in 0..10 {
        f();
    }

    // Actual benchmark
    for _ in 0..iterations {
        let start = Instant::now();
        f();
        durations.push(start.elapsed());
    }

    let total_duration: Duration = durations.iter().sum();
    let avg_duration = total_duration / iterations as u32;
    let min_duration = *durations.iter().min().unwrap();
    let max_duration = *durations.iter().max().unwrap();

    BenchmarkResult {
        name: name.to_string(),
        iterations,
        total_duration,
        avg_duration,
        min_duration,
        max_duration,
    }
}

#[test]
fn bench_growth_pass() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║              GROWTH PASS BENCHMARKS                            ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    let sizes = vec![
        ("Small (10 rows)", SMALL_OUTLINE_ROWS),
        ("Medium (100 rows)", MEDIUM_OUTLINE_ROWS),
        ("Large (1000 rows)", LARGE_OUTLINE_ROWS),
        ("Huge (10000 rows)", HUGE_OUTLINE_ROWS),
    ];

    for (name, rows) in sizes {
        let template = create_ragged_outline(rows, 3);
        let result = benchmark(
            &format!("synchronize (wrap + pad all rows) - {}", name),
            if name.contains("Huge") { 10 } else { ITERATIONS },
            || {
                let mut doc = template.clone();
                let mut model = LiveModel::new(&mut doc);
                let _ = synchronize(&mut model, 0);
            },
        );
        result.print();
    }
}

#[test]
fn bench_noop_pass() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║              NO-OP PASS BENCHMARKS                             ║");
    println!("╚════════════════════════════════════════════════════════════════╝");
    println!("\nUniform outlines: the pass only reads counts. This runs after");
    println!("every structural keystroke, so it has to stay cheap.");

    let sizes = vec![
        ("Small (10 rows)", SMALL_OUTLINE_ROWS),
        ("Medium (100 rows)", MEDIUM_OUTLINE_ROWS),
        ("Large (1000 rows)", LARGE_OUTLINE_ROWS),
        ("Huge (10000 rows)", HUGE_OUTLINE_ROWS),
    ];

    for (name, rows) in sizes {
        let mut doc = create_uniform_outline(rows, 3);
        let result = benchmark(
            &format!("synchronize (uniform, no changes) - {}", name),
            ITERATIONS,
            || {
                let mut model = LiveModel::new(&mut doc);
                let _ = synchronize(&mut model, 0);
            },
        );
        result.print();
    }
}

#[test]
fn bench_patch_vs_live() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║           PATCH VS LIVE MUTATION BENCHMARKS                    ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    let template = create_ragged_outline(MEDIUM_OUTLINE_ROWS, 3);

    let live = benchmark("live pass - Medium (100 rows)", ITERATIONS, || {
        let mut doc = template.clone();
        let mut model = LiveModel::new(&mut doc);
        let _ = synchronize(&mut model, 0);
    });
    live.print();

    let patched = benchmark("patch build + commit - Medium (100 rows)", ITERATIONS, || {
        let mut doc = template.clone();
        let mut patch = Patch::new(&doc);
        if synchronize(&mut patch, 0).is_ok() {
            let _ = patch.commit(&mut doc);
        }
    });
    patched.print();

    let overhead_pct = ((patched.avg_duration.as_micros() as f64
        / live.avg_duration.as_micros() as f64)
        - 1.0)
        * 100.0;
    println!("\nPatch overhead over live mutation: {:.1}%", overhead_pct);
}

#[test]
fn bench_editor_edit_cycle() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║              EDITOR EDIT CYCLE BENCHMARKS                      ║");
    println!("╚════════════════════════════════════════════════════════════════╝");
    println!("\nThis simulates the full cost of an editing burst:");
    println!("  1. Move the caret into a cell");
    println!("  2. Type 10 characters");
    println!("  3. Run the content-changed hook");

    let sizes = vec![
        ("Small (10 rows)", SMALL_OUTLINE_ROWS),
        ("Medium (100 rows)", MEDIUM_OUTLINE_ROWS),
        ("Large (1000 rows)", LARGE_OUTLINE_ROWS),
    ];

    for (name, rows) in sizes {
        let template = create_uniform_outline(rows, 3);
        let result = benchmark(&format!("edit burst - {}", name), ITERATIONS, || {
            let mut editor = OutlineEditor::new(template.clone());
            editor.move_caret_to_cell(0, 0);
            for _ in 0..10 {
                editor.insert_char('x');
            }
            editor.on_content_changed();
        });
        result.print();

        let per_char = result.avg_duration / 10;
        println!("\nPer-character cost: {:?}", per_char);
        if per_char.as_millis() > 16 {
            println!("⚠️  CRITICAL: Typing will feel laggy (>16ms per keystroke)");
        }
    }
}

#[test]
fn bench_structural_commands() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║           STRUCTURAL COMMAND BENCHMARKS                        ║");
    println!("╚════════════════════════════════════════════════════════════════╝");
    println!("\nIndent sinks a row into its predecessor and triggers a pass that");
    println!("pads every other row, so this is the worst-case keystroke.");

    let sizes = vec![
        ("Small (10 rows)", SMALL_OUTLINE_ROWS),
        ("Medium (100 rows)", MEDIUM_OUTLINE_ROWS),
        ("Large (1000 rows)", LARGE_OUTLINE_ROWS),
    ];

    for (name, rows) in sizes {
        let template = create_uniform_outline(rows, 0);
        let result = benchmark(
            &format!("indent + growth pass - {}", name),
            ITERATIONS,
            || {
                let mut editor = OutlineEditor::new(template.clone());
                editor.move_caret_to_row(1);
                editor.indent_current_item();
            },
        );
        result.print();
    }
}

#[test]
fn bench_grid_snapshot() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║              GRID SNAPSHOT BENCHMARKS                          ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    let sizes = vec![
        ("Medium (100 rows)", MEDIUM_OUTLINE_ROWS),
        ("Large (1000 rows)", LARGE_OUTLINE_ROWS),
        ("Huge (10000 rows)", HUGE_OUTLINE_ROWS),
    ];

    for (name, rows) in sizes {
        let editor = OutlineEditor::new(create_uniform_outline(rows, 3));
        let result = benchmark(
            &format!("grid - {}", name),
            if name.contains("Huge") { 10 } else { ITERATIONS },
            || {
                let _ = editor.grid();
            },
        );
        result.print();
    }
}
