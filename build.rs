use anyhow::*;
use fs_extra::copy_items;
use fs_extra::dir::CopyOptions;
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Rerun if the bundled resources change.
    println!("cargo:rerun-if-changed=assets");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let assets_src = manifest_dir.join("assets");
    if assets_src.exists() {
        let mut copy_options = CopyOptions::new();
        copy_options.overwrite = true;
        copy_items(&[assets_src], &out_dir, &copy_options)?;
    }
    // `BundleLoader::bundled` resolves resources relative to this directory.
    println!(
        "cargo:rustc-env=AR_SCENES_BUNDLE_DIR={}",
        out_dir.join("assets").display()
    );

    Ok(())
}
