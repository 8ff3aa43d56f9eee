//! Print the brick layout for a field width as JSON.
//!
//! Usage: `layout_dump [FIELD_WIDTH]` (defaults to 1024).

use arcade::brick;

const DEFAULT_WIDTH: f32 = 1024.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let width = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<f32>()?,
        None => DEFAULT_WIDTH,
    };

    let bricks = brick::layout(width);
    log::info!(
        "{} columns, {} bricks for width {width}",
        brick::columns_for_width(width),
        bricks.len()
    );

    serde_json::to_writer_pretty(std::io::stdout(), &bricks)?;
    println!();
    Ok(())
}
