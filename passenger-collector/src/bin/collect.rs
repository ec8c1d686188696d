use miette::*;

use passenger_collector::{max_passengers, Grid};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    #[rustfmt::skip]
    let grid = Grid::new(3, vec![
        0, 1, -1,
        1, 0, -1,
        1, 1, 1,
    ])?;
    let result = max_passengers(&grid);
    println!("Result: {}", result);
    Ok(())
}
