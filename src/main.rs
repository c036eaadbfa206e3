use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use engine::prelude::*;

mod sheets;

pub const APP_NAME: &str = "roomview";

#[derive(Parser, Debug)]
struct Args {
    /// Room definition document.
    room: PathBuf,

    #[arg(
        long,
        value_name = "DIR",
        default_value = "sheets",
        help = "Directory of sprite sheet images and frame tables"
    )]
    sheets: PathBuf,

    #[arg(long, value_name = "FILE", help = "Room layout settings")]
    layout: Option<PathBuf>,

    #[arg(long, help = "Show the room as cleared with connections open")]
    cleared: bool,

    #[arg(long, help = "Outline collision geometry")]
    collision: bool,

    #[arg(
        long,
        value_name = "FILE",
        default_value = "room.png",
        help = "Output image"
    )]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    navni::logger::start(APP_NAME);

    let args = Args::parse();

    let mut layout = if let Some(path) = &args.layout {
        Layout::load(path)?
    } else {
        Layout::default()
    };
    layout.show_collision |= args.collision;

    let data = RoomData::load(&args.room)?;

    let cache = sheets::cache(args.sheets.clone());
    let mut room = Room::new(&cache, layout)?;
    room.set(&data)?;
    if args.cleared {
        room.notify_clear();
    }

    // Canvas reaches from the origin to the far corner of the room.
    let [w, h] = room.draw_rect().max();
    let mut canvas = Buffer::new(w.max(1) as u32, h.max(1) as u32);
    room.draw(&mut canvas);

    std::fs::write(&args.out, canvas.to_png()?)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    log::info!("wrote {}", args.out.display());

    Ok(())
}
