use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

/// Write a synthetic student-scores table (.csv or .parquet)
#[derive(Parser, Debug)]
#[command(name = "generate-sample")]
struct Args {
    /// Output file; the extension picks the format
    #[arg(default_value = "datasets/student-scores.csv")]
    output: PathBuf,

    /// Number of students
    #[arg(short, long, default_value_t = 2000)]
    rows: usize,

    /// PRNG seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const FEMALE_NAMES: [&str; 8] = ["Danielle", "Tina", "Emma", "Kelly", "Maria", "Grace", "Nora", "Alice"];
const MALE_NAMES: [&str; 8] = ["Paul", "John", "Joseph", "Leo", "Mark", "Omar", "Ian", "Victor"];
const LAST_NAMES: [&str; 8] = ["Casey", "Sandoval", "Andrews", "Mitchell", "Brown", "Lopez", "Kim", "Ward"];

struct Student {
    id: i64,
    first_name: String,
    last_name: String,
    gender: &'static str,
    part_time_job: bool,
    absence_days: i64,
    weekly_self_study_hours: f64,
    math_score: i64,
}

fn generate(rows: usize, rng: &mut SimpleRng) -> Vec<Student> {
    (0..rows)
        .map(|i| {
            let female = rng.next_f64() < 0.5;
            let (gender, names) = if female {
                ("female", &FEMALE_NAMES)
            } else {
                ("male", &MALE_NAMES)
            };
            let part_time_job = rng.next_f64() < 0.16;
            let absence_days = rng.gauss(3.5, 2.5).round().clamp(0.0, 10.0);
            let hours = rng.gauss(18.0, 12.0).clamp(0.0, 50.0).round();

            // Study time helps, absences and a part-time job hurt.
            let mean = 62.0 + 0.55 * hours - 1.3 * absence_days
                - if part_time_job { 4.0 } else { 0.0 };
            let score = rng.gauss(mean, 9.0).round().clamp(40.0, 100.0);

            Student {
                id: i as i64 + 1,
                first_name: names[rng.below(names.len())].to_string(),
                last_name: LAST_NAMES[rng.below(LAST_NAMES.len())].to_string(),
                gender,
                part_time_job,
                absence_days: absence_days as i64,
                weekly_self_study_hours: hours,
                math_score: score as i64,
            }
        })
        .collect()
}

fn write_csv(path: &Path, students: &[Student]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record([
        "id",
        "first_name",
        "last_name",
        "gender",
        "part_time_job",
        "absence_days",
        "weekly_self_study_hours",
        "math_score",
    ])?;
    for s in students {
        writer.write_record([
            s.id.to_string(),
            s.first_name.clone(),
            s.last_name.clone(),
            s.gender.to_string(),
            // Same spelling pandas writes for a bool column.
            if s.part_time_job { "True" } else { "False" }.to_string(),
            s.absence_days.to_string(),
            s.weekly_self_study_hours.to_string(),
            s.math_score.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, students: &[Student]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("first_name", DataType::Utf8, false),
        Field::new("last_name", DataType::Utf8, false),
        Field::new("gender", DataType::Utf8, false),
        Field::new("part_time_job", DataType::Boolean, false),
        Field::new("absence_days", DataType::Int64, false),
        Field::new("weekly_self_study_hours", DataType::Float64, false),
        Field::new("math_score", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(students.iter().map(|s| s.id))),
            Arc::new(StringArray::from_iter_values(students.iter().map(|s| &s.first_name))),
            Arc::new(StringArray::from_iter_values(students.iter().map(|s| &s.last_name))),
            Arc::new(StringArray::from_iter_values(students.iter().map(|s| s.gender))),
            Arc::new(BooleanArray::from(
                students.iter().map(|s| s.part_time_job).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from_iter_values(students.iter().map(|s| s.absence_days))),
            Arc::new(Float64Array::from_iter_values(
                students.iter().map(|s| s.weekly_self_study_hours),
            )),
            Arc::new(Int64Array::from_iter_values(students.iter().map(|s| s.math_score))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut rng = SimpleRng::new(args.seed);
    let students = generate(args.rows, &mut rng);

    let ext = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(&args.output, &students)?,
        "parquet" | "pq" => write_parquet(&args.output, &students)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    println!("Wrote {} students to {}", students.len(), args.output.display());
    Ok(())
}
