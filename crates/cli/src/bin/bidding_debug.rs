use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::bidding_utils::*;
use cli::logging::{init_logging, LogFormat};
use engine::{generate_random_board, DecisionPipeline, EngineConfig, TurnRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;
use solver::DoubleDummyOracle;
use std::path::PathBuf;
use std::sync::Arc;
use types::io::identifier;
use types::{Auction, Board, Call};

#[derive(Parser, Debug)]
#[command(author, version, about = "Bid a board through the decision pipeline", long_about = None)]
struct Args {
    /// The board identifier (e.g. 11-decde22e0d283f55b36244ab45)
    identifier: Option<String>,

    /// Optional call number to show the full trace for
    #[arg(short, long)]
    call: Option<usize>,

    /// A test case string in JSON format: '["Hand", "ExpectedCall", "Auction"?, "Vulnerability"?]'
    #[arg(short, long)]
    test_case: Option<String>,

    /// Deal a random board from this seed instead of reading one
    #[arg(long)]
    seed: Option<u64>,

    /// Engine configuration (YAML)
    #[arg(long, env = "BIDDING_CONFIG")]
    config: Option<PathBuf>,

    /// Review slams and doubles with the double-dummy solver
    #[arg(long)]
    double_dummy: bool,

    /// Skip sample-based review entirely
    #[arg(long, conflicts_with = "double_dummy")]
    no_review: bool,

    /// Print one JSON turn record per line instead of a table
    #[arg(long)]
    json: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn resolve_inputs(args: &Args) -> Result<(Board, Vec<Call>, Option<String>)> {
    if let Some(test_case_json) = &args.test_case {
        parse_test_case(test_case_json)
    } else if let Some(id) = &args.identifier {
        let (board, auction) =
            identifier::import_board(id).with_context(|| format!("invalid identifier {id:?}"))?;
        Ok((board, auction.map(|a| a.calls).unwrap_or_default(), None))
    } else if let Some(seed) = args.seed {
        let mut rng = StdRng::seed_from_u64(seed);
        let board_number = (seed % 16) as u32 + 1;
        Ok((generate_random_board(board_number, &mut rng), Vec::new(), None))
    } else {
        bail!("must provide an identifier, --test-case, or --seed")
    }
}

fn build_pipeline(args: &Args) -> Result<DecisionPipeline> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let pipeline = DecisionPipeline::standard(config)?;
    Ok(if args.double_dummy {
        pipeline.with_oracle(Arc::new(DoubleDummyOracle))
    } else if args.no_review {
        pipeline.without_oracle()
    } else {
        pipeline
    })
}

fn print_board_info(args: &Args, board: &Board) {
    if let Some(id) = &args.identifier {
        println!("Board: {}", id);
    } else if let Some(test_case) = &args.test_case {
        println!("Test Case: {}", test_case);
    } else {
        println!("Board: {}", identifier::export_board(board, 1, None));
    }
    println!("Dealer: {:?}", board.dealer);
    println!("Vulnerability: {:?}", board.vulnerability);

    println!("\nHands:");
    print!("{}", format_hands_table(&board.hands));

    println!();
    print!("{}", format_table_header());
}

fn emit(args: &Args, idx: usize, record: &TurnRecord) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string(record)?);
    } else {
        println!("{}", format_record_row(idx, record));
    }
    Ok(())
}

fn run_bidding_loop(
    args: &Args,
    pipeline: &DecisionPipeline,
    board: &Board,
    auction: &mut Auction,
    expected: Option<&str>,
    idx: &mut usize,
) -> Result<()> {
    while !auction.is_finished() {
        let seat = auction.current_player();
        let Some(hand) = board.get_hand(seat) else {
            break;
        };

        let record = pipeline.decide(auction, hand);
        *idx += 1;
        if args.call == Some(*idx) {
            print!("{}", format_full_trace(*idx, &record, &pipeline.belief(auction)));
        }
        emit(args, *idx, &record)?;

        if let Some(expected) = expected {
            let expected: Call = expected
                .parse()
                .with_context(|| format!("bad expected call {expected:?}"))?;
            println!("EXPECTED: {}", expected.render());
            let verdict = if expected == record.final_call { "MATCH" } else { "MISMATCH" };
            println!("RESULT: {verdict}");
        }

        auction.add_call(record.final_call);
        if args.test_case.is_some() {
            break;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_format, tracing::Level::WARN);

    let (board, history, expected) = resolve_inputs(&args)?;
    let pipeline = build_pipeline(&args)?;

    if !args.json {
        print_board_info(&args, &board);
    }

    let mut auction = Auction::new(board.dealer);
    let mut idx = 0;
    let replayed = replay_history(&mut auction, &history, &mut idx);
    if !args.json {
        print!("{replayed}");
    }

    run_bidding_loop(
        &args,
        &pipeline,
        &board,
        &mut auction,
        expected.as_deref(),
        &mut idx,
    )?;

    if !args.json {
        match auction.final_contract() {
            Some(contract) => println!("\nContract: {contract}"),
            None if auction.is_finished() => println!("\nPassed out"),
            None => {}
        }
    }
    Ok(())
}
