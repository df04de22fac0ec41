// Chart builder tests: pies from the latest summary, instance line over a range

mod common;

use insights_charts::charts::{
    data_fs_pie, music_fs_pie, num_instance_line, os_pie, player_type_pie,
};
use insights_charts::error::ChartError;
use insights_charts::summary_repo::SummaryRow;
use serde_json::{Value, json};

fn parse(text: &str) -> Value {
    serde_json::from_str(text).expect("builder output is JSON")
}

fn row(time: &str, payload: &str) -> SummaryRow {
    SummaryRow::new(time, payload)
}

#[tokio::test]
async fn test_os_pie_full_document() {
    let rows = [row(
        "2024-01-01T00:00:00Z",
        r#"{"os":{"linux":10,"darwin":4}}"#,
    )];
    let spec = parse(&os_pie(&rows[..]).await.unwrap());
    assert_eq!(
        spec,
        json!({
            "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
            "title": "Operating Systems",
            "description": "Distribution of operating systems used by clients",
            "data": { "values": [
                { "os": "darwin", "c": 4 },
                { "os": "linux", "c": 10 }
            ]},
            "mark": { "type": "arc", "tooltip": true },
            "encoding": {
                "theta": { "field": "c", "type": "quantitative", "stack": "normalize", "title": "Percentage" },
                "color": {
                    "field": "os", "type": "nominal",
                    "sort": { "field": "c", "order": "descending" },
                    "title": "Operating System"
                },
                "order": { "field": "c", "type": "quantitative", "sort": "descending", "title": "Count" }
            }
        })
    );
}

#[tokio::test]
async fn test_pie_key_order_is_fixed() {
    let rows = [row("2024-01-01T00:00:00Z", r#"{"dataFS":{"zfs":1}}"#)];
    let text = data_fs_pie(&rows[..]).await.unwrap();
    assert!(text.starts_with(
        r#"{"$schema":"https://vega.github.io/schema/vega-lite/v5.json","title":"Data File Systems","#
    ));
    assert!(text.contains(r#""data":{"values":[{"fs":"zfs","c":1}]},"mark":{"type":"arc","tooltip":true},"encoding":{"theta""#));
}

#[tokio::test]
async fn test_pie_value_count_matches_mapping_size() {
    let summary = common::sample_summary();
    let payload = serde_json::to_string(&summary).unwrap();
    let rows = [row("2024-01-01T00:00:00Z", &payload)];

    let cases = [
        (os_pie(&rows[..]).await.unwrap(), summary.os.len()),
        (music_fs_pie(&rows[..]).await.unwrap(), summary.music_fs.len()),
        (data_fs_pie(&rows[..]).await.unwrap(), summary.data_fs.len()),
        (player_type_pie(&rows[..]).await.unwrap(), summary.player_types.len()),
    ];
    for (text, expected) in cases {
        let spec = parse(&text);
        assert_eq!(spec["data"]["values"].as_array().unwrap().len(), expected);
        assert_eq!(spec["encoding"]["theta"]["stack"], "normalize");
    }
}

#[tokio::test]
async fn test_fs_pies_share_dimension_with_distinct_titles() {
    let rows = [row(
        "2024-01-01T00:00:00Z",
        r#"{"musicFS":{"ext4":8},"dataFS":{"btrfs":5}}"#,
    )];
    let music = parse(&music_fs_pie(&rows[..]).await.unwrap());
    let data = parse(&data_fs_pie(&rows[..]).await.unwrap());
    assert_eq!(music["data"]["values"], json!([{ "fs": "ext4", "c": 8 }]));
    assert_eq!(data["data"]["values"], json!([{ "fs": "btrfs", "c": 5 }]));
    assert_eq!(music["encoding"]["color"]["title"], "File System (music)");
    assert_eq!(data["encoding"]["color"]["title"], "File System (data)");
    assert_eq!(music["title"], "Music File Systems");
    assert_eq!(data["title"], "Data File Systems");
}

#[tokio::test]
async fn test_player_type_label() {
    let rows = [row("2024-01-01T00:00:00Z", r#"{"playerTypes":{"Bassline":7}}"#)];
    let spec = parse(&player_type_pie(&rows[..]).await.unwrap());
    assert_eq!(spec["data"]["values"], json!([{ "pt": "Bassline: 7", "c": 7 }]));
    assert_eq!(spec["encoding"]["color"]["field"], "pt");
    assert_eq!(spec["encoding"]["color"]["title"], "Client");
}

#[tokio::test]
async fn test_pie_on_empty_source_is_empty_chart() {
    let rows: [SummaryRow; 0] = [];
    let spec = parse(&os_pie(&rows[..]).await.unwrap());
    assert_eq!(spec["data"]["values"], json!([]));
    assert_eq!(spec["mark"]["type"], "arc");
}

#[tokio::test]
async fn test_pie_on_empty_store_is_empty_chart() {
    let (_dir, repo, _) = common::empty_repo().await;
    let spec = parse(&os_pie(&repo.latest_summary()).await.unwrap());
    assert_eq!(spec["data"]["values"], json!([]));
}

#[tokio::test]
async fn test_pie_with_non_blob_payload_is_empty_chart() {
    let (_dir, repo, path) = common::empty_repo().await;
    common::insert_raw_row(&path, "2024-01-01T00:00:00Z", Some(r#"{"os":{"linux":1}}"#)).await;
    let spec = parse(&os_pie(&repo.latest_summary()).await.unwrap());
    assert_eq!(spec["data"]["values"], json!([]));
}

#[tokio::test]
async fn test_pie_missing_mapping_is_empty_chart() {
    let rows = [row("2024-01-01T00:00:00Z", r#"{"numInstances":3}"#)];
    let spec = parse(&player_type_pie(&rows[..]).await.unwrap());
    assert_eq!(spec["data"]["values"], json!([]));
}

#[tokio::test]
async fn test_pie_malformed_payload_is_decode_error() {
    let rows = [row("2024-01-01T00:00:00Z", "{\"os\": ")];
    let err = os_pie(&rows[..]).await.unwrap_err();
    assert!(matches!(err, ChartError::Decode(_)));
}

#[tokio::test]
async fn test_pie_reads_latest_summary_from_store() {
    let (_dir, repo, _) = common::empty_repo().await;
    let mut old = common::sample_summary();
    old.os = common::counts(&[("beos", 1)]);
    repo.save_summary(common::day(2024, 1, 1), &old).await.unwrap();
    repo.save_summary(common::day(2024, 1, 2), &common::sample_summary())
        .await
        .unwrap();

    let spec = parse(&os_pie(&repo.latest_summary()).await.unwrap());
    let labels: Vec<&str> = spec["data"]["values"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["os"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["darwin", "linux", "windows"]);
}

#[tokio::test]
async fn test_num_instance_line_two_rows() {
    let (_dir, repo, _) = common::empty_repo().await;
    let first = insights_charts::models::Summary {
        versions: common::counts(&[("1.0", 3)]),
        num_instances: Some(5),
        ..Default::default()
    };
    let second = insights_charts::models::Summary {
        versions: common::counts(&[("1.0", 2), ("2.0", 4)]),
        num_instances: Some(6),
        ..Default::default()
    };
    repo.save_summary(common::day(2024, 1, 1), &first).await.unwrap();
    repo.save_summary(common::day(2024, 1, 2), &second).await.unwrap();

    let spec = parse(&num_instance_line(&repo.all_summaries()).await.unwrap());
    assert_eq!(
        spec["data"]["values"],
        json!([
            {},
            { "v": "1.0", "n": 3, "d": "2024-01-01" },
            { "v": "all", "n": 5, "d": "2024-01-01" },
            { "v": "1.0", "n": 2, "d": "2024-01-02" },
            { "v": "2.0", "n": 4, "d": "2024-01-02" },
            { "v": "all", "n": 6, "d": "2024-01-02" }
        ])
    );
}

#[tokio::test]
async fn test_num_instance_line_document_shape() {
    let rows: [SummaryRow; 0] = [];
    let spec = parse(&num_instance_line(&rows[..]).await.unwrap());
    assert_eq!(
        spec,
        json!({
            "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
            "title": "Number of Instances Over Time",
            "description": "Number of instances of the server over time, by version",
            "data": { "values": [{}] },
            "height": 500,
            "width": 1000,
            "mark": { "type": "line", "tooltip": true, "point": true },
            "encoding": {
                "color": {
                    "field": "v", "type": "nominal",
                    "sort": { "field": "n", "op": "sum", "order": "descending" },
                    "title": "Version"
                },
                "x": { "field": "d", "type": "temporal", "timeUnit": "yearmonthdate", "title": "Date" },
                "y": { "field": "n", "type": "quantitative", "title": "Number of Instances" }
            }
        })
    );
}

#[tokio::test]
async fn test_num_instance_line_bad_time_is_error() {
    let rows = [row("not a time", r#"{"numInstances":1}"#)];
    let err = num_instance_line(&rows[..]).await.unwrap_err();
    assert!(matches!(err, ChartError::InvalidTime { .. }));
}

#[tokio::test]
async fn test_num_instance_line_malformed_payload_is_error() {
    let rows = [
        row("2024-01-01T00:00:00Z", r#"{"numInstances":1}"#),
        row("2024-01-02T00:00:00Z", "nope"),
    ];
    let err = num_instance_line(&rows[..]).await.unwrap_err();
    assert!(matches!(err, ChartError::Decode(_)));
}

#[tokio::test]
async fn test_builders_are_idempotent() {
    let (_dir, repo, _) = common::empty_repo().await;
    repo.save_summary(common::day(2024, 1, 1), &common::sample_summary())
        .await
        .unwrap();
    repo.save_summary(common::day(2024, 1, 2), &common::sample_summary())
        .await
        .unwrap();

    let latest = repo.latest_summary();
    assert_eq!(
        os_pie(&latest).await.unwrap(),
        os_pie(&latest).await.unwrap()
    );
    assert_eq!(
        player_type_pie(&latest).await.unwrap(),
        player_type_pie(&latest).await.unwrap()
    );
    let all = repo.all_summaries();
    assert_eq!(
        num_instance_line(&all).await.unwrap(),
        num_instance_line(&all).await.unwrap()
    );
}

#[tokio::test]
async fn test_pie_uses_newest_row_across_time_offsets() {
    let (_dir, repo, path) = common::empty_repo().await;
    let newer = insights_charts::models::Summary {
        os: common::counts(&[("newer", 1)]),
        ..Default::default()
    };
    let older = insights_charts::models::Summary {
        os: common::counts(&[("older", 1)]),
        ..Default::default()
    };
    common::insert_raw_summary(&path, "2024-01-01T23:30:00-02:00", &newer).await;
    common::insert_raw_summary(&path, "2024-01-02T00:00:00Z", &older).await;

    let spec = parse(&os_pie(&repo.latest_summary()).await.unwrap());
    assert_eq!(spec["data"]["values"], json!([{ "os": "newer", "c": 1 }]));
}
