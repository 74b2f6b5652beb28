use dexgraph::{AnalysisOptions, Session};
use std::env;
use std::error::Error;

// Opens an APK (or a bare .dex), then prints who loads a given string literal
// and who calls methods of a given class.

//Usage: apk_xrefs <apk-or-dex> [string] [class]
fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <apk-or-dex> [string] [class]", args[0]);
        std::process::exit(1);
    }

    if let Err(e) = report(&args[1], args.get(2).map(String::as_str), args.get(3).map(String::as_str)) {
        eprintln!("Aborted due to error: {e}");
        std::process::exit(1);
    }
}

fn report(path: &str, needle: Option<&str>, class: Option<&str>) -> Result<(), Box<dyn Error>> {
    let options = AnalysisOptions::default().with_skip_bad_images(true);
    let session = if path.ends_with(".dex") {
        Session::open_with([(path.to_string(), std::fs::read(path)?)], &options)?
    } else {
        Session::open_apk(path, &options)?
    };

    for failure in session.failures() {
        println!("skipped {failure}");
    }
    println!(
        "{} image(s), {} classes, {} methods ({} external)",
        session.image_count(),
        session.class_analyses().filter(|c| !c.external).count(),
        session.method_analysis_count(),
        session.external_method_count()
    );

    if let Some(needle) = needle {
        match session.string_analysis(needle) {
            Some(s) => {
                for site in &s.xrefs_from {
                    let m = session.method(site.method).ok_or("dangling method key")?;
                    println!("\"{}\" loaded by {} @{:04x}", needle, m.dalvik_name(), site.offset);
                }
            }
            None => println!("\"{needle}\" is not in the string pool"),
        }
    }

    if let Some(class) = class {
        let Some(c) = session.class_analysis(class) else {
            println!("{class} is not referenced");
            return Ok(());
        };
        println!("{} ({})", c.java_name(), if c.external { "external" } else { "internal" });
        for key in &c.methods {
            let m = session.method(*key).ok_or("dangling method key")?;
            for site in &m.xrefs_from {
                let caller = session.method(site.method).ok_or("dangling method key")?;
                println!("  {} <- {} @{:04x}", m.name, caller.dalvik_name(), site.offset);
            }
        }
    }
    Ok(())
}
