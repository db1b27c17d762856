//! Generate demo data for trying out the organize and clean commands
//!
//! Writes a directory of loose files spanning every category plus an
//! employees CSV with missing cells, whitespace damage, inconsistent
//! casing, and duplicate rows.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let root = std::env::args().nth(1).unwrap_or_else(|| "/tmp/tidyup_demo".to_string());
    let root = Path::new(&root);

    let files_dir = root.join("loose_files");
    fs::create_dir_all(&files_dir)?;

    println!("Generating demo files in {}\n", files_dir.display());

    let sample_files = [
        "quarterly_report.pdf",
        "notes.txt",
        "team_photo.jpg",
        "logo.png",
        "screencast.mp4",
        "podcast_episode.mp3",
        "backup.zip",
        "budget.xlsx",
        "script.py",
        "main.rs",
        "mystery.xyz",
        "README",
    ];
    for name in sample_files {
        fs::write(files_dir.join(name), format!("sample content for {name}\n"))?;
    }
    println!("  {} loose files written", sample_files.len());

    let csv_path = root.join("employees.csv");
    let mut writer = BufWriter::new(File::create(&csv_path)?);

    writeln!(writer, "employee_id,name,age,salary,department,city")?;
    // Clean baseline rows
    writeln!(writer, "1,Ahmet Yilmaz,34,72000,IT,Istanbul")?;
    writeln!(writer, "2,Ayse Demir,41,88000,Finance,Ankara")?;
    // Whitespace damage
    writeln!(writer, "3,  Mehmet Kaya  ,29,54000, Sales ,Izmir")?;
    writeln!(writer, "4,Elif Kilic ,37,61000,Marketing, Bursa ")?;
    // Missing values
    writeln!(writer, "5,Fatma Celik,,67000,HR,Istanbul")?;
    writeln!(writer, "6,Ali Sahin,45,,it,")?;
    writeln!(writer, "7,,31,59000,SALES,Antalya")?;
    writeln!(writer, "8,Zeynep Ozturk,NA,75000,finance,ankara")?;
    // Case inconsistencies
    writeln!(writer, "9,Mustafa Arslan,52,94000,FINANCE,ISTANBUL")?;
    writeln!(writer, "10,Hasan Aslan,27,48000,hr,izmir")?;
    // Exact duplicates of earlier rows
    writeln!(writer, "1,Ahmet Yilmaz,34,72000,IT,Istanbul")?;
    writeln!(writer, "2,Ayse Demir,41,88000,Finance,Ankara")?;
    writeln!(writer, "9,Mustafa Arslan,52,94000,FINANCE,ISTANBUL")?;
    writer.flush()?;

    println!("  dirty CSV written to {}", csv_path.display());
    println!("\nTry:");
    println!("  tidyup organize --source {}", files_dir.display());
    println!(
        "  tidyup clean --input {} --output {}",
        csv_path.display(),
        root.join("employees_clean.csv").display()
    );

    Ok(())
}
