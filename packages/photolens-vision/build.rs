use std::env;
use std::path::PathBuf;
use std::process::Command;

const BRIDGE_SRC: &str = "src/swift/VisionBridge.swift";
const BRIDGE_LIB: &str = "photolens_vision_bridge";

fn run(cmd: &mut Command, what: &str) {
    let status = cmd
        .status()
        .unwrap_or_else(|e| panic!("failed to run {what}: {e}"));
    assert!(status.success(), "{what} failed");
}

fn xcrun(args: &[&str]) -> String {
    let output = Command::new("xcrun")
        .args(args)
        .output()
        .expect("failed to run xcrun");
    String::from_utf8(output.stdout)
        .expect("xcrun printed non-utf8 output")
        .trim()
        .to_string()
}

fn main() {
    println!("cargo:rerun-if-changed={BRIDGE_SRC}");

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "macos" {
        return;
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap();

    // Swift bridge -> object -> static archive
    let object_file = out_dir.join("VisionBridge.o");
    run(
        Command::new("swiftc")
            .args(["-emit-object", "-O", "-parse-as-library", "-target"])
            .arg(format!("{arch}-apple-macosx13.0"))
            .arg("-o")
            .arg(&object_file)
            .arg(BRIDGE_SRC),
        "swiftc",
    );
    let lib_file = out_dir.join(format!("lib{BRIDGE_LIB}.a"));
    run(
        Command::new("ar").arg("rcs").arg(&lib_file).arg(&object_file),
        "ar",
    );

    println!("cargo:rustc-link-search=native={}", out_dir.display());
    println!("cargo:rustc-link-lib=static={BRIDGE_LIB}");

    for framework in ["Vision", "Foundation", "CoreGraphics"] {
        println!("cargo:rustc-link-lib=framework={framework}");
    }

    // Swift runtime from the SDK and from the active toolchain
    let sdk = xcrun(&["--show-sdk-path"]);
    let swift = PathBuf::from(xcrun(&["--toolchain", "default", "--find", "swift"]));
    let toolchain_lib = swift
        .parent()
        .and_then(|bin| bin.parent())
        .expect("unexpected swift location")
        .join("lib/swift/macosx");

    println!("cargo:rustc-link-search=native={sdk}/usr/lib/swift");
    println!("cargo:rustc-link-search=native={}", toolchain_lib.display());
    println!("cargo:rustc-link-lib=dylib=swiftCore");
}
