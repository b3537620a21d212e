use media_timeline::{timeline_front, trace};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    trace::setup();

    timeline_front::run(std::env::args_os().nth(1).map(PathBuf::from))
}
