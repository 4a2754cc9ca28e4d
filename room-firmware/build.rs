// Build-Script: Linker-Skripte für ESP32-C6 + hilfreiche Linker-Fehler

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Hinweise bei undefinierten Symbolen (Linker ruft dieses Script erneut auf)
    linker_hints();

    // defmt.x: Symbole für defmt's binäres Log-Format
    println!("cargo:rustc-link-arg=-Tdefmt.x");
    // linkall.x: Flash/RAM-Layout, muss als LETZTES kommen
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

// Wird vom Linker als "--error-handling-script <kind> <symbol>" aufgerufen
fn linker_hints() {
    let args: Vec<String> = std::env::args().collect();

    if let [_, kind, symbol, ..] = args.as_slice() {
        if kind != "undefined-symbol" {
            std::process::exit(1);
        }

        let hint = match symbol.as_str() {
            s if s.starts_with("_defmt_") => {
                Some("`defmt` not found - is `defmt.x` passed to the linker and `esp-println` linked?")
            }
            "_stack_start" => Some("Is the linker script `linkall.x` missing?"),
            s if s.starts_with("esp_rtos_") || s.starts_with("__embassy") => {
                Some("embassy time driver missing - did you call `esp_rtos::start()`?")
            }
            _ => None,
        };
        if let Some(hint) = hint {
            eprintln!();
            eprintln!("💡 {}", hint);
            eprintln!();
        }
        std::process::exit(0);
    }

    if let Ok(exe) = std::env::current_exe() {
        println!(
            "cargo:rustc-link-arg=--error-handling-script={}",
            exe.display()
        );
    }
}
