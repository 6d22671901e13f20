use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=config.toml");
    println!("cargo:rerun-if-changed=matrix.json");

    // Get the output directory from cargo
    let out_dir = env::var("OUT_DIR")?;

    // target/<profile>/ sits three levels above OUT_DIR
    let Some(target_dir) = Path::new(&out_dir).ancestors().nth(3) else {
        return Ok(());
    };

    // Copy config.toml and the demo data next to the binary
    for file in ["config.toml", "matrix.json"] {
        let source = Path::new(file);
        if source.exists() {
            fs::copy(source, target_dir.join(file))?;
        }
    }

    Ok(())
}
