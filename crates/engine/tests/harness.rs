use engine::{DecisionPipeline, EngineConfig};
use indexmap::IndexMap;
use std::fs;
use types::{Auction, Call, Hand, Position};

fn parse_auction(history: &str) -> Auction {
    let tokens: Vec<&str> = history.split_whitespace().collect();
    Auction::from_tokens(Position::North, &tokens).expect("history must be a legal auction")
}

#[test]
fn run_pipeline_test_vectors() {
    let test_file = "../../tests/bidding/pipeline.yaml";
    let file_content = fs::read_to_string(test_file).expect("Failed to read test vectors");
    let test_suites: IndexMap<String, Vec<Vec<String>>> =
        serde_yaml::from_str(&file_content).expect("Failed to parse YAML");

    let pipeline = DecisionPipeline::standard(EngineConfig::default()).unwrap();
    let mut failures = Vec::new();
    let mut total = 0;

    for (suite_name, cases) in &test_suites {
        for (idx, case) in cases.iter().enumerate() {
            total += 1;
            let hand = Hand::parse(&case[0]);
            assert_eq!(hand.len(), 13, "{suite_name}[{idx}]: hand must hold 13 cards");
            let expected: Call = case[1].parse().expect("expected call must parse");
            let history = parse_auction(case.get(2).map(String::as_str).unwrap_or(""));

            let record = pipeline.decide(&history, &hand);
            if record.final_call != expected {
                failures.push(format!(
                    "{suite_name}[{idx}]: after {:?} expected {}, got {} ({})",
                    history.calls.iter().map(|c| c.render()).collect::<Vec<_>>(),
                    expected.render(),
                    record.final_call.render(),
                    record.rationale
                ));
            }
        }
    }

    assert!(total > 0, "no test vectors found");
    assert!(
        failures.is_empty(),
        "{} of {} vectors failed:\n{}",
        failures.len(),
        total,
        failures.join("\n")
    );
}
