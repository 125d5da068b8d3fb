use crate::infra::{load_question_bank, parse_depth, InMemoryProfileRepository};
use clap::Args;
use divine::assessments::{
    score_assessment, AssessmentDepth, AssessmentOutcome, AssessmentProgress, AssessmentService,
    Gift, LikertScore, MemberId, ProfileRepository, Question, ResponseSet,
};
use divine::config::AppConfig;
use divine::error::AppError;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct QuestionsArgs {
    /// Assessment depth to list (quick or expanded)
    #[arg(long, default_value = "quick", value_parser = parse_depth)]
    pub(crate) depth: AssessmentDepth,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON object mapping question ids to 1-5 answers
    #[arg(long)]
    pub(crate) responses: PathBuf,
    /// Question set the responses were collected against
    #[arg(long, default_value = "quick", value_parser = parse_depth)]
    pub(crate) depth: AssessmentDepth,
    /// Include the per-gift breakdown in the output
    #[arg(long)]
    pub(crate) breakdown: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Assessment depth to walk through (quick or expanded)
    #[arg(long, default_value = "quick", value_parser = parse_depth)]
    pub(crate) depth: AssessmentDepth,
    /// Answer every question with this value instead of the scripted pattern
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) answer: Option<u8>,
    /// Member id used when persisting the demo profile
    #[arg(long, default_value = "demo-member")]
    pub(crate) member: String,
}

pub(crate) fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let bank = load_question_bank(&config.assessments)?;
    let questions = bank.questions(args.depth);

    println!(
        "{} assessment: {} questions across {} gifts",
        args.depth.label(),
        questions.len(),
        bank.gifts().len()
    );
    for question in &questions {
        println!("- [{}] {} ({})", question.id, question.prompt, question.gift);
    }

    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let bank = load_question_bank(&config.assessments)?;
    let raw = fs::read_to_string(&args.responses)?;
    let responses: ResponseSet = serde_json::from_str(&raw)?;

    let questions = bank.questions(args.depth);
    let outcome = score_assessment(&questions, &responses)?;

    if args.breakdown {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&outcome.profile)?);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        depth,
        answer,
        member,
    } = args;

    let config = AppConfig::load()?;
    let bank = Arc::new(load_question_bank(&config.assessments)?);
    let repository = Arc::new(InMemoryProfileRepository::default());
    let service = AssessmentService::new(
        bank,
        repository.clone(),
        config.assessments.page_size,
    );

    println!("Spiritual gifts assessment demo ({} depth)", depth.label());
    let mut session = service.start_session(depth)?;
    let page_count = session.page_count();

    loop {
        let page: Vec<Question> = session.current_page()?.to_vec();
        let page_number = match session.progress() {
            AssessmentProgress::InProgress { page } => page + 1,
            _ => 0,
        };
        println!("\nPage {page_number}/{page_count}");
        for question in &page {
            let value = answer.unwrap_or_else(|| scripted_answer(question));
            session.record(&question.id, LikertScore::new(value)?)?;
            println!("  {value}  {}", question.prompt);
        }

        if page_number >= page_count {
            break;
        }
        session.advance()?;
    }

    let responses = session.submit()?.clone();
    session.score()?;
    let outcome = score_assessment(&service.questions(depth), &responses)?;
    render_outcome(&outcome);

    let record = service.submit(MemberId(member), depth, &responses)?;
    match repository.latest(&record.member_id) {
        Ok(Some(stored)) => println!(
            "\nStored profile payload:\n{}",
            serde_json::to_string_pretty(&stored.summary_view())?
        ),
        Ok(None) => println!("\nRepository lookup returned no record"),
        Err(err) => println!("\nRepository unavailable: {err}"),
    }

    Ok(())
}

fn render_outcome(outcome: &AssessmentOutcome) {
    let profile = &outcome.profile;
    println!(
        "\nProfile: {} ({} engagement, average {:.1})",
        profile.profile_label,
        profile.engagement_level.label(),
        profile.average_score
    );
    println!("{}", profile.profile_description);
    println!("Serving style: {}", profile.serving_style);

    let top: Vec<&str> = profile.top_gifts.iter().map(|gift| gift.label()).collect();
    println!("Top gifts: {}", top.join(", "));

    println!("\nGift breakdown");
    for score in &outcome.gift_scores {
        println!(
            "- {}: {:.2} ({} of {} answered points)",
            score.gift,
            score.average_score,
            score.total_score,
            score.question_count * u32::from(LikertScore::MAX)
        );
    }
    if outcome.unanswered > 0 {
        println!("{} question(s) left unanswered", outcome.unanswered);
    }
}

/// Leans toward relational gifts so the demo shows a varied ranking.
fn scripted_answer(question: &Question) -> u8 {
    match question.gift {
        Gift::Mercy | Gift::Encouragement | Gift::Hospitality => 5,
        Gift::Service | Gift::Intercession => 4,
        Gift::Teaching | Gift::Wisdom | Gift::Faith => 3,
        Gift::Administration | Gift::Leadership | Gift::Giving | Gift::Evangelism => 2,
    }
}
