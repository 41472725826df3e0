use std::sync::Arc;

use arrow::array::{Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Row {
    platform: String,
    genre: String,
    year: i32,
    critic_score: Option<f64>,
    user_score: Option<f64>,
    rating: Option<f64>,
}

fn generate_rows(n: usize, rng: &mut SimpleRng) -> Vec<Row> {
    let platforms = ["PS2", "PS3", "X360", "Wii", "PC", "DS"];
    // (genre, typical critic score)
    let genres = [
        ("Action", 72.0),
        ("Sports", 70.0),
        ("RPG", 76.0),
        ("Shooter", 74.0),
        ("Puzzle", 66.0),
        ("Racing", 69.0),
    ];
    let age_ratings = [3.0, 7.0, 12.0, 16.0, 18.0];

    (0..n)
        .map(|_| {
            let &(genre, critic_base) = rng.pick(&genres);
            let critic = rng.gauss(critic_base, 9.0).clamp(10.0, 99.0);
            let user = (critic / 10.0 + rng.gauss(0.0, 0.8)).clamp(1.0, 10.0);

            Row {
                platform: rng.pick(&platforms).to_string(),
                genre: genre.to_string(),
                year: 1990 + (rng.next_u64() % 21) as i32,
                critic_score: (rng.next_f64() >= 0.05).then_some((critic * 10.0).round() / 10.0),
                // The real dataset marks plenty of user scores as "tbd".
                user_score: (rng.next_f64() >= 0.12).then_some((user * 10.0).round() / 10.0),
                rating: (rng.next_f64() >= 0.08).then_some(*rng.pick(&age_ratings)),
            }
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer
        .write_record([
            "Platform",
            "Genre",
            "Year_of_Release",
            "Critic_Score",
            "User_Score",
            "Rating",
        ])
        .expect("Failed to write CSV header");

    for row in rows {
        let year = row.year.to_string();
        let critic = row
            .critic_score
            .map(|v| v.to_string())
            .unwrap_or_default();
        // Missing user scores are spelled "tbd", as in the source data.
        let user = row
            .user_score
            .map(|v| v.to_string())
            .unwrap_or_else(|| "tbd".to_string());
        let rating = row.rating.map(|v| v.to_string()).unwrap_or_default();

        writer
            .write_record([
                row.platform.as_str(),
                row.genre.as_str(),
                year.as_str(),
                critic.as_str(),
                user.as_str(),
                rating.as_str(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");
}

fn write_parquet(rows: &[Row], path: &str) {
    let platform_array =
        StringArray::from(rows.iter().map(|r| r.platform.as_str()).collect::<Vec<_>>());
    let genre_array =
        StringArray::from(rows.iter().map(|r| r.genre.as_str()).collect::<Vec<_>>());
    let year_array = Int32Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>());
    let critic_array =
        Float64Array::from(rows.iter().map(|r| r.critic_score).collect::<Vec<_>>());
    let user_array = Float64Array::from(rows.iter().map(|r| r.user_score).collect::<Vec<_>>());
    let rating_array = Float64Array::from(rows.iter().map(|r| r.rating).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("Platform", DataType::Utf8, false),
        Field::new("Genre", DataType::Utf8, false),
        Field::new("Year_of_Release", DataType::Int32, false),
        Field::new("Critic_Score", DataType::Float64, true),
        Field::new("User_Score", DataType::Float64, true),
        Field::new("Rating", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(platform_array),
            Arc::new(genre_array),
            Arc::new(year_array),
            Arc::new(critic_array),
            Arc::new(user_array),
            Arc::new(rating_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(800, &mut rng);

    write_csv(&rows, "sample_games.csv");
    write_parquet(&rows, "sample_games.parquet");

    println!(
        "Wrote {} games to sample_games.csv and sample_games.parquet",
        rows.len()
    );
}
