//! Example: Encoding and Decoding a Class Roster
//!
//! Builds a five-student roster, encodes it, decodes it back and prints both
//! sides. With `fuzz <iterations>` it instead throws random buffers at the
//! decoder and reports how many were accepted.
//!
//! Run with:
//! - `cargo run --example class_roster`
//! - `cargo run --example class_roster -- fuzz 100000`
//!
//! Configuration comes from `RECORD_WIRE_*` environment variables.

#![allow(clippy::uninlined_format_args)]

use rand::Rng;
use record_wire::config::Config;
use record_wire::model::{ClassRoster, Student};
use record_wire::utils::init_logging;
use record_wire::RecordCodec;

/// Largest random buffer the fuzz mode generates
const MAX_FUZZ_SIZE: usize = 10_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_logging(&config.logging)?;
    let codec = RecordCodec::from_config(&config.codec)?;

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("fuzz") => {
            let iterations = match args.next() {
                Some(n) => n.parse::<u64>()?,
                None => 10_000,
            };
            fuzz(&codec, iterations);
        }
        Some(other) => return Err(format!("unknown command: {other}").into()),
        None => roundtrip(&codec)?,
    }

    Ok(())
}

fn roundtrip(codec: &RecordCodec) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Class Roster Codec Demo ===\n");
    println!("Alignment: {} bytes\n", codec.alignment());

    let roster = ClassRoster::sample();
    print_roster("Original", &roster);

    let size = codec.encoded_size(&roster);
    let mut buf = vec![0u8; size];
    let written = codec.encode_into(&roster, &mut buf)?;
    println!("Encoded {} bytes (size query: {})", written, size);
    println!("Head: {:02X?}\n", &buf[..buf.len().min(32)]);

    let decoded: ClassRoster = codec.decode_exact(&buf)?;
    print_roster("Decoded", &decoded);

    println!(
        "Roundtrip: {}",
        if decoded == roster {
            "✓ Success"
        } else {
            "✗ Failed"
        }
    );
    Ok(())
}

fn print_roster(label: &str, roster: &ClassRoster) {
    println!("{label}: {} (established {})", roster.name, roster.year_established);
    if !roster.notes.is_empty() {
        println!("  Notes: {}", roster.notes);
    }
    for student in &roster.students {
        print_student(student);
    }
    println!();
}

fn print_student(student: &Student) {
    let full_name = [
        student.given_name.as_str(),
        student.second_name.as_str(),
        student.third_name.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" ");

    println!(
        "  - {:<22} age {:>3}  {:?}{}  score {:.2}",
        full_name,
        student.age,
        student.attendance,
        if student.suspended { " (suspended)" } else { "" },
        student.performance_score
    );
    if !student.notes.is_empty() {
        println!("      {}", student.notes);
    }
}

fn fuzz(codec: &RecordCodec, iterations: u64) {
    println!("Fuzzing the decoder with {iterations} random buffers...");

    let mut rng = rand::rng();
    let mut accepted = 0u64;
    let mut buf = vec![0u8; MAX_FUZZ_SIZE];

    for _ in 0..iterations {
        let size = rng.random_range(1..=MAX_FUZZ_SIZE);
        let input = &mut buf[..size];
        rng.fill(&mut *input);

        if codec.decode::<ClassRoster>(input).is_ok() {
            accepted += 1;
        }
    }

    println!("Done: {accepted} of {iterations} buffers decoded as a roster");
}
