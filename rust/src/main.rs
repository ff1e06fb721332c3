use std::env;
use std::io::{self, Write};
use std::process;

use serde_json::json;
use ulid_field::{ULID_LEN, UlidGen, is_ulid_string, new_ulid, parse_ulid};

#[derive(Debug, Clone, Copy, Default)]
struct StreamOpts {
    count: usize,
}

fn print_help() {
    eprintln!(
        "ulid-field - ULID generator and validator CLI\n\n\
Usage:\n  ulid-field next\n  ulid-field stream [--count <n>]\n  ulid-field validate <ulid>\n  ulid-field parse <ulid> [--json]\n  ulid-field healthcheck [--json]\n\
For stream: --count 0 (the default) streams until interrupted\n"
    );
}

fn parse_stream_flags(args: &[String]) -> Result<StreamOpts, String> {
    let mut opts = StreamOpts::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--count" => {
                if i + 1 >= args.len() {
                    return Err("missing value for --count".to_string());
                }
                opts.count = args[i + 1]
                    .parse::<usize>()
                    .map_err(|_| "invalid integer for --count".to_string())?;
                i += 2;
            }
            _ => return Err(format!("unknown flag: {}", args[i])),
        }
    }

    Ok(opts)
}

fn run_next(args: &[String]) -> Result<(), String> {
    if !args.is_empty() {
        return Err(format!("unknown flag: {}", args[0]));
    }

    println!("{}", new_ulid());
    Ok(())
}

fn run_stream(args: &[String]) -> Result<(), String> {
    let opts = parse_stream_flags(args)?;
    let mut source = UlidGen::new();
    let mut emitted = 0usize;

    loop {
        if opts.count > 0 && emitted >= opts.count {
            break;
        }
        let id = source.next_ulid().map_err(|e| e.to_string())?;
        println!("{id}");
        io::stdout().flush().map_err(|e| e.to_string())?;
        emitted += 1;
    }

    Ok(())
}

fn run_validate(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("validate requires a ulid".to_string());
    }
    if args.len() > 1 {
        return Err(format!("unknown flag: {}", args[1]));
    }

    let ok = is_ulid_string(&args[0]);
    println!("{}", if ok { "true" } else { "false" });
    if ok {
        Ok(())
    } else {
        Err("invalid ulid".to_string())
    }
}

fn run_parse(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("parse requires a ulid".to_string());
    }

    let id = args[0].clone();
    let mut json_out = false;
    for arg in &args[1..] {
        if arg == "--json" {
            json_out = true;
        } else {
            return Err(format!("unknown flag: {arg}"));
        }
    }

    let parsed = parse_ulid(&id).map_err(|e| e.to_string())?;

    if json_out {
        // randomness exceeds JSON's integer range, emit it as a string
        let payload = json!({
            "raw": parsed.raw,
            "timestamp": parsed.timestamp.to_rfc3339(),
            "timestamp_ms": parsed.timestamp_ms(),
            "randomness": parsed.randomness.to_string(),
        });
        println!(
            "{}",
            serde_json::to_string(&payload).map_err(|e| e.to_string())?
        );
    } else {
        println!("raw={}", parsed.raw);
        println!("timestamp={}", parsed.timestamp.to_rfc3339());
        println!("timestamp_ms={}", parsed.timestamp_ms());
        println!("randomness={}", parsed.randomness);
    }

    Ok(())
}

fn run_healthcheck(args: &[String]) -> Result<(), String> {
    let mut json_mode = false;
    for arg in args {
        if arg == "--json" {
            json_mode = true;
        } else {
            return Err(format!("unknown flag: {arg}"));
        }
    }

    let mut source = UlidGen::new();
    let sample = source.next_ulid().map_err(|e| e.to_string())?;
    let ok = is_ulid_string(sample.as_str());

    if json_mode {
        let payload = json!({
            "ok": ok,
            "len": ULID_LEN,
            "sample_id": sample.as_str(),
        });
        println!(
            "{}",
            serde_json::to_string(&payload).map_err(|e| e.to_string())?
        );
    } else {
        println!("ok={} sample={}", if ok { "true" } else { "false" }, sample);
    }

    if ok {
        Ok(())
    } else {
        Err("healthcheck failed".to_string())
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        print_help();
        process::exit(2);
    }

    if args[0] == "-h" || args[0] == "--help" || args[0] == "help" {
        print_help();
        return;
    }

    let cmd = args[0].as_str();
    let rest = &args[1..];

    let res = match cmd {
        "next" => run_next(rest),
        "stream" => run_stream(rest),
        "healthcheck" => run_healthcheck(rest),
        "validate" => run_validate(rest),
        "parse" => run_parse(rest),
        _ => Err(format!("unknown command: {}", cmd)),
    };

    if let Err(err) = res {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
