use datahub_notify::config::ConfigLoader;
use datahub_notify::line::LineEncoder;
use std::time::{Duration, Instant};

const TAGS: &[&str] = &["PUMP_TRIP", "FURNACE_TEMP_HIGH", "CONVEYOR_STOP", "LADLE_POSITION", "GAS_LEAK"];
const VALUES: &[&str] = &["0", "1", "10", "255", "-1", "ALARM", "CLEAR"];
const SERVERS: &[(&str, &str)] = &[("scbosco1", "9080"), ("scbosco2", "9080"), ("unknown", "1")];

fn fast_random(seed: &mut u64) -> u64 {
    *seed ^= *seed << 13;
    *seed ^= *seed >> 7;
    *seed ^= *seed << 17;
    *seed
}

struct BenchmarkStats {
    total_lines: usize,
    total_bytes: usize,
    total_duration: Duration,
    batch_latencies: Vec<Duration>,
}

impl BenchmarkStats {
    fn lines_per_sec(&self) -> f64 {
        self.total_lines as f64 / self.total_duration.as_secs_f64()
    }

    fn mb_per_sec(&self) -> f64 {
        self.total_bytes as f64 / 1024.0 / 1024.0 / self.total_duration.as_secs_f64()
    }

    fn percentile(&self, pct: usize) -> Duration {
        let mut sorted = self.batch_latencies.clone();
        sorted.sort();
        sorted
            .get(sorted.len() * pct / 100)
            .copied()
            .unwrap_or_default()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    let lines_per_batch: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10_000);
    let num_batches: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(100);
    let config_path =
        std::env::var("DATAHUB_CONFIG").unwrap_or_else(|_| "conf/localDefaults.ini".to_string());

    let loaded = ConfigLoader::new(&config_path).load();
    let encoder = LineEncoder::new(&loaded.config.table)?;

    println!("DataHub Encode Benchmark");
    println!("========================");
    println!("Config:          {}", config_path);
    println!("Lines per batch: {}", lines_per_batch);
    println!("Batches:         {}", num_batches);
    println!();

    let mut seed: u64 = 12345;
    let mut batch_latencies = Vec::with_capacity(num_batches);
    let mut total_bytes = 0;
    let start = Instant::now();

    for batch_num in 0..num_batches {
        let batch_start = Instant::now();
        for i in 0..lines_per_batch {
            let (server, port) = SERVERS[fast_random(&mut seed) as usize % SERVERS.len()];
            let key = loaded.config.keys.resolve(server, port);
            let line = encoder.encode(
                TAGS[fast_random(&mut seed) as usize % TAGS.len()],
                1_700_000_000 + (batch_num * lines_per_batch + i) as i64,
                VALUES[fast_random(&mut seed) as usize % VALUES.len()],
                key,
            );
            total_bytes += line.len();
        }
        batch_latencies.push(batch_start.elapsed());
    }

    let stats = BenchmarkStats {
        total_lines: lines_per_batch * num_batches,
        total_bytes,
        total_duration: start.elapsed(),
        batch_latencies,
    };

    println!("  Lines/sec:   {:.0}", stats.lines_per_sec());
    println!("  Throughput:  {:.2} MB/s", stats.mb_per_sec());
    println!("  Total time:  {:?}", stats.total_duration);
    println!("  Percentiles: p50={:?} p99={:?}",
        stats.percentile(50), stats.percentile(99));

    Ok(())
}
