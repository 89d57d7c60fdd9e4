use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const SIGNS: [&str; 12] = [
    "ARIES", "TAURUS", "GEMINI", "CANCER", "LEO", "VIRGO", "LIBRA", "SCORPIO", "SAGITTARIUS",
    "CAPRICORN", "AQUARIUS", "PISCES",
];

const COLORS: [&str; 4] = ["White", "Blue", "Black", "Red"];

const SIGN_COLUMNS: [&str; 13] = [
    "sun", "moon", "mercury", "venus", "mars", "jupiter", "saturn", "uranus", "neptune", "pluto",
    "nn", "asc", "mc",
];

/// One row of the sample table, in file column order.
#[derive(Debug, Serialize)]
struct Row {
    sn: i64,
    name: String,
    lat: f64,
    lon: f64,
    gp: f64,
    pts: f64,
    rbs: f64,
    ast: f64,
    fg: f64,
    fg3: f64,
    ft: f64,
    efg: f64,
    per: f64,
    ws: f64,
    sun: String,
    moon: String,
    mercury: String,
    venus: String,
    mars: String,
    jupiter: String,
    saturn: String,
    uranus: String,
    neptune: String,
    pluto: String,
    nn: String,
    asc: String,
    mc: String,
    venus_cycle: String,
}

impl Row {
    fn signs(&self) -> [&str; 13] {
        [
            &self.sun,
            &self.moon,
            &self.mercury,
            &self.venus,
            &self.mars,
            &self.jupiter,
            &self.saturn,
            &self.uranus,
            &self.neptune,
            &self.pluto,
            &self.nn,
            &self.asc,
            &self.mc,
        ]
    }
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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Stat rounded to one decimal; roughly one in twenty is 0.
    fn stat(&mut self, lo: f64, hi: f64) -> f64 {
        if self.next_f64() < 0.05 {
            0.0
        } else {
            (self.uniform(lo, hi) * 10.0).round() / 10.0
        }
    }
}

/// Efficiency rating; short careers (at most 10 games) may be outliers, which
/// the dashboard's efficiency slider bound ignores.
fn efficiency(rng: &mut SimpleRng, gp: f64) -> f64 {
    if gp <= 10.0 {
        rng.stat(0.0, 60.0)
    } else {
        rng.stat(0.0, 27.9)
    }
}

fn generate(n: usize, rng: &mut SimpleRng) -> Vec<Row> {
    (0..n)
        .map(|i| {
            let mut sign = || rng.pick(&SIGNS).to_string();
            let (sun, moon, mercury, venus, mars, jupiter, saturn) =
                (sign(), sign(), sign(), sign(), sign(), sign(), sign());
            let (uranus, neptune, pluto, nn, asc, mc) = (sign(), sign(), sign(), sign(), sign(), sign());
            let venus_cycle = format!("{}_{}", rng.pick(&COLORS), 1 + rng.next_u64() % 5);
            let gp = (rng.uniform(1.0, 1400.0)).round();
            Row {
                sn: i as i64,
                name: format!("Player {i:04}"),
                lat: rng.uniform(25.0, 49.0),
                lon: rng.uniform(-124.0, -67.0),
                gp,
                pts: rng.stat(0.0, 30.1),
                rbs: rng.stat(0.0, 13.5),
                ast: rng.stat(0.0, 11.2),
                fg: rng.stat(30.0, 60.0),
                fg3: rng.stat(0.0, 45.0),
                ft: rng.stat(40.0, 92.0),
                efg: rng.stat(35.0, 62.0),
                per: efficiency(rng, gp),
                ws: rng.stat(0.0, 250.0),
                sun,
                moon,
                mercury,
                venus,
                mars,
                jupiter,
                saturn,
                uranus,
                neptune,
                pluto,
                nn,
                asc,
                mc,
                venus_cycle,
            }
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV");
    for row in rows {
        writer.serialize(row).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");
}

fn write_parquet(rows: &[Row], path: &str) {
    let floats = |f: fn(&Row) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let mut fields = vec![
        Field::new("sn", DataType::Int64, false),
        Field::new("name", DataType::Utf8, false),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(rows.iter().map(|r| r.sn).collect::<Vec<_>>())),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        )),
    ];

    let numeric: [(&str, fn(&Row) -> f64); 12] = [
        ("lat", |r| r.lat),
        ("lon", |r| r.lon),
        ("gp", |r| r.gp),
        ("pts", |r| r.pts),
        ("rbs", |r| r.rbs),
        ("ast", |r| r.ast),
        ("fg", |r| r.fg),
        ("fg3", |r| r.fg3),
        ("ft", |r| r.ft),
        ("efg", |r| r.efg),
        ("per", |r| r.per),
        ("ws", |r| r.ws),
    ];
    for (name, get) in numeric {
        fields.push(Field::new(name, DataType::Float64, false));
        columns.push(floats(get));
    }

    for (i, name) in SIGN_COLUMNS.iter().enumerate() {
        fields.push(Field::new(*name, DataType::Utf8, false));
        columns.push(Arc::new(StringArray::from(
            rows.iter().map(|r| r.signs()[i]).collect::<Vec<_>>(),
        )));
    }

    fields.push(Field::new("venus_cycle", DataType::Utf8, false));
    columns.push(Arc::new(StringArray::from(
        rows.iter().map(|r| r.venus_cycle.as_str()).collect::<Vec<_>>(),
    )));

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = generate(600, &mut rng);

    let csv_path = "players_astro3.csv";
    let parquet_path = "players_astro3.parquet";
    write_csv(&rows, csv_path);
    write_parquet(&rows, parquet_path);

    println!("Wrote {} players to {csv_path} and {parquet_path}", rows.len());
}
