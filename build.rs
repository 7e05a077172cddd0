// Build script for arts-ffi
//
// Regenerates include/arts.h from the exported functions. Header generation
// is best-effort: a cbindgen failure only emits a warning so the library
// itself still builds.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/");

    let Ok(crate_dir) = env::var("CARGO_MANIFEST_DIR") else {
        return;
    };

    let output_dir = PathBuf::from(&crate_dir).join("include");
    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        println!("cargo:warning=cannot create include/: {e}");
        return;
    }

    let generated = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("ARTS_FFI_H")
        .generate();

    match generated {
        Ok(bindings) => {
            bindings.write_to_file(output_dir.join("arts.h"));
        }
        Err(e) => println!("cargo:warning=arts.h not regenerated: {e}"),
    }
}
