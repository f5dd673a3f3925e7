//! Example: Solving a single axis
//!
//! This example lays out the horizontal edges of three columns directly with
//! the solver, without building a workspace, and prints the solver state.

use tilegrid::{
    segment::{GridSegment, StackSegment},
    solver::{Scaffold, vertex::DEFAULT_MERGE_TOLERANCE},
};

fn main() {
    // Column edges as fractions of the container width
    let segments = [
        StackSegment::new(0.0, 0.2),
        StackSegment::new(0.2, 0.7),
        StackSegment::new(0.7, 1.0),
        StackSegment::new(0.2, 1.0),
    ];

    let scaffold = Scaffold::build(&segments, 12, DEFAULT_MERGE_TOLERANCE);
    println!(
        "Scaffold weight {}, minimal span {} cells\n",
        scaffold.weight(),
        scaffold.minimal_span()
    );

    for requested in [GridSegment::new(0, 80), GridSegment::new(0, 20)] {
        let layout = scaffold.layout(requested);
        println!("Requested {requested}, got grid space {}", layout.grid_space());
        for (segment, grid) in segments.iter().zip(layout.grid_segments()) {
            println!("  {segment:?} -> {grid}");
        }
        println!();
    }

    let layout = scaffold.layout(GridSegment::new(0, 80));
    print!("{}", scaffold.diagnostics(&layout));
}
