use std::{env, fs, path::PathBuf};

fn main() {
    // 1) Handle memory.x and link scripts based on target
    let target = env::var("TARGET").unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    if target.starts_with("thumbv8m") {
        // Pico 2 ARM: copy memory-pico2.x to OUT_DIR as memory.x
        copy_memory_x("memory-pico2.x", &out_dir);
    } else if target.starts_with("thumbv6m") {
        // Pico 1: copy memory-pico1.x to OUT_DIR as memory.x
        copy_memory_x("memory-pico1.x", &out_dir);
    }

    // Firmware link scripts: cortex-m-rt, the RP2040 boot2 stage and defmt
    if target.starts_with("thumbv") {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        if target.starts_with("thumbv6m") {
            println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
        }
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // 2) Load optional env files (still supported for convenience)
    let _ = dotenvy::from_filename(".env");
    load_home_env(".pico.env");

    // 3) Tunable timings, with the appliance's reference values as fallbacks
    let display_refresh_hz = env_or_default("DISPLAY_REFRESH_HZ", "1000");
    let keypad_settle_ms = env_or_default("KEYPAD_SETTLE_MS", "10");
    let mode_switch_settle_ms = env_or_default("MODE_SWITCH_SETTLE_MS", "200");

    for (key, value) in [
        ("DISPLAY_REFRESH_HZ", &display_refresh_hz),
        ("KEYPAD_SETTLE_MS", &keypad_settle_ms),
        ("MODE_SWITCH_SETTLE_MS", &mode_switch_settle_ms),
    ] {
        if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
            panic!("{key} must be a decimal integer, got {value:?}");
        }
    }

    // 4) Expose as compile-time constants
    println!("cargo:rustc-env=DISPLAY_REFRESH_HZ={display_refresh_hz}");
    println!("cargo:rustc-env=KEYPAD_SETTLE_MS={keypad_settle_ms}");
    println!("cargo:rustc-env=MODE_SWITCH_SETTLE_MS={mode_switch_settle_ms}");

    // Optional: don't rebuild unless these change
    println!("cargo:rerun-if-env-changed=DISPLAY_REFRESH_HZ");
    println!("cargo:rerun-if-env-changed=KEYPAD_SETTLE_MS");
    println!("cargo:rerun-if-env-changed=MODE_SWITCH_SETTLE_MS");
    println!("cargo:rerun-if-changed=.env");
}

fn copy_memory_x(file: &str, out_dir: &PathBuf) {
    let memory_x = fs::read_to_string(file).unwrap_or_else(|_| panic!("Failed to read {file}"));
    let dest = out_dir.join("memory.x");
    fs::write(&dest, memory_x).expect("Failed to write memory.x");
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed={file}");
}

fn load_home_env(file: &str) {
    let home = match env::var_os("USERPROFILE").or_else(|| env::var_os("HOME")) {
        Some(path) => PathBuf::from(path),
        None => return,
    };
    let path = home.join(file);
    let _ = dotenvy::from_path(&path);
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
