use pointfield::prelude::*;

fn main() {
    env_logger::init();

    let result = FieldAnimation::new()
        .with_title("pointfield")
        .run();

    if let Err(e) = result {
        eprintln!("pointfield: {}", e);
        std::process::exit(1);
    }
}
