// Print one chart spec built from a summary database.
//
// Usage: cargo run --example render_chart -- [DB_PATH] [CHART]
//   DB_PATH  default: ./data/insights.db
//   CHART    os | music-fs | data-fs | player-types | instances (default: os)

use insights_charts::charts;
use insights_charts::summary_repo::SummaryRepo;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let path = args.get(1).map(String::as_str).unwrap_or("./data/insights.db");
    let chart = args.get(2).map(String::as_str).unwrap_or("os");

    let repo = SummaryRepo::connect(path, 1).await?;
    repo.init().await?;

    let latest = repo.latest_summary();
    let spec = match chart {
        "os" => charts::os_pie(&latest).await?,
        "music-fs" => charts::music_fs_pie(&latest).await?,
        "data-fs" => charts::data_fs_pie(&latest).await?,
        "player-types" => charts::player_type_pie(&latest).await?,
        "instances" => charts::num_instance_line(&repo.all_summaries()).await?,
        other => anyhow::bail!("unknown chart {:?}", other),
    };

    println!("{}", spec);
    Ok(())
}
