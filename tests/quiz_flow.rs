use std::sync::Arc;

use aelius_donatus_bot::{
    bank::{QuestionBank, Topic},
    engine::QuizEngine,
    replies::{AnswerReply, QuizReply, Score, TopicReply},
    selector::PresentedQuestion,
    state::SessionState,
};
use rand::{rngs::StdRng, SeedableRng};
use teloxide::types::UserId;

const BANK: &str = r#"{
    "ablativo assoluto": [
        {"q": "Urbe capta, hostes fugerunt: urbe capta è", "opts": ["ablativo assoluto", "participio congiunto", "ablativo di causa", "complemento di mezzo"], "ans": 0, "spiega": "Participio in ablativo concordato con un nome sciolto dalla reggente."},
        {"q": "Caesare duce significa", "opts": ["con Cesare come comandante", "Cesare conduce", "per Cesare", "verso Cesare"], "ans": 0, "spiega": "Ablativo assoluto nominale."}
    ],
    "gerundivo": [
        {"q": "Carthago delenda est: delenda è", "opts": ["supino", "gerundio", "gerundivo", "participio presente"], "ans": 2, "spiega": "Perifrastica passiva."}
    ]
}"#;

const ALICE: UserId = UserId(1001);
const BOB: UserId = UserId(2002);

fn engine(seed: u64) -> Arc<QuizEngine> {
    let bank = QuestionBank::from_json(BANK).unwrap();
    Arc::new(QuizEngine::with_rng(Arc::new(bank), StdRng::seed_from_u64(seed)))
}

async fn ask(engine: &QuizEngine, user: UserId) -> PresentedQuestion {
    match engine.start_quiz(user).await.unwrap() {
        QuizReply::Question(question) => question,
        QuizReply::NoTopic => panic!("expected a question"),
    }
}

#[tokio::test]
async fn quiz_without_topic_asks_to_choose_one() {
    let engine = engine(1);

    let reply = engine.start_quiz(ALICE).await.unwrap();

    assert_eq!(reply, QuizReply::NoTopic);
    assert!(reply.to_string().contains("Prima scegli un argomento"));
    let session = engine.session(ALICE).await;
    assert_eq!(session.state(), &SessionState::NoTopic);
    assert_eq!(session.asked(), 0);
}

#[tokio::test]
async fn topic_in_sentence_is_recognized() {
    let engine = engine(1);

    let reply = engine
        .select_topic(ALICE, "amo l'ablativo assoluto e il gerundivo")
        .await;

    assert_eq!(reply, TopicReply::Selected(Topic::new("ablativo assoluto")));
}

#[tokio::test]
async fn correct_answer_scores_a_point() {
    let engine = engine(2);

    engine.select_topic(ALICE, "Ablativo Assoluto").await;
    assert_eq!(
        engine.session(ALICE).await.state(),
        &SessionState::Idle {
            topic: Topic::new("ablativo assoluto")
        }
    );

    let question = ask(&engine, ALICE).await;
    let session = engine.session(ALICE).await;
    assert!(matches!(session.state(), SessionState::AwaitingAnswer { .. }));
    assert_eq!(session.asked(), 1);

    let reply = engine.answer(ALICE, question.correct()).await;
    match &reply {
        AnswerReply::Verdict(verdict) => assert!(verdict.correct),
        AnswerReply::NoActiveQuestion => panic!("the question was pending"),
    }
    assert!(reply.to_string().starts_with("✅ Corretto!"));
    assert!(reply.to_string().ends_with("Punteggio: 1/1"));

    let session = engine.session(ALICE).await;
    assert_eq!(session.score(), 1);
    assert_eq!(
        session.state(),
        &SessionState::Idle {
            topic: Topic::new("ablativo assoluto")
        }
    );
}

#[tokio::test]
async fn wrong_answer_reveals_solution() {
    let engine = engine(3);
    engine.select_topic(ALICE, "gerundivo").await;

    let question = ask(&engine, ALICE).await;
    let wrong = (question.correct() + 1) % 4;
    let reply = engine.answer(ALICE, wrong).await.to_string();

    let expected = format!(
        "Soluzione: {} – {}",
        question.correct_letter(),
        question.correct_option()
    );
    assert!(reply.starts_with("❌ Errato."));
    assert!(reply.contains(&expected), "{reply}");
    assert_eq!(question.correct_option(), "gerundivo");
    assert_eq!(engine.score(ALICE).await, Score { score: 0, asked: 1 });
}

#[tokio::test]
async fn answer_without_question_is_refused() {
    let engine = engine(4);

    assert_eq!(engine.answer(ALICE, 0).await, AnswerReply::NoActiveQuestion);

    engine.select_topic(ALICE, "gerundivo").await;
    let question = ask(&engine, ALICE).await;
    engine.answer(ALICE, question.correct()).await;
    assert_eq!(
        engine.answer(ALICE, question.correct()).await,
        AnswerReply::NoActiveQuestion
    );
    assert_eq!(engine.score(ALICE).await, Score { score: 1, asked: 1 });
}

#[tokio::test]
async fn button_of_replaced_question_answers_the_newest_one() {
    let engine = engine(8);
    engine.select_topic(ALICE, "ablativo assoluto").await;

    let replaced = ask(&engine, ALICE).await;
    let newest = ask(&engine, ALICE).await;

    match engine.answer(ALICE, replaced.correct()).await {
        AnswerReply::Verdict(verdict) => {
            assert_eq!(verdict.question, newest);
            assert_eq!(verdict.correct, replaced.correct() == newest.correct());
            assert_eq!(verdict.asked, 2);
        }
        AnswerReply::NoActiveQuestion => panic!("the newest question was pending"),
    }
    assert_eq!(
        engine.answer(ALICE, newest.correct()).await,
        AnswerReply::NoActiveQuestion
    );
}

#[tokio::test]
async fn stop_resets_counters() {
    let engine = engine(5);
    engine.select_topic(ALICE, "gerundivo").await;
    let question = ask(&engine, ALICE).await;
    engine.answer(ALICE, question.correct()).await;

    engine.stop(ALICE);

    let score = engine.score(ALICE).await;
    assert_eq!(score, Score { score: 0, asked: 0 });
    assert_eq!(score.to_string(), "Punteggio: 0/0");
    assert_eq!(engine.session(ALICE).await.state(), &SessionState::NoTopic);
}

#[tokio::test]
async fn users_progress_independently() {
    let engine = engine(6);
    engine.select_topic(ALICE, "gerundivo").await;
    engine.select_topic(BOB, "ablativo assoluto").await;

    let question = ask(&engine, ALICE).await;
    engine.answer(ALICE, question.correct()).await;

    assert_eq!(engine.score(ALICE).await, Score { score: 1, asked: 1 });
    assert_eq!(engine.score(BOB).await, Score { score: 0, asked: 0 });
    assert_eq!(
        engine.session(BOB).await.state().topic(),
        Some(&Topic::new("ablativo assoluto"))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn double_tap_scores_once() {
    for seed in 0..50 {
        let engine = engine(seed);
        engine.select_topic(ALICE, "ablativo assoluto").await;
        let question = ask(&engine, ALICE).await;
        let choice = question.correct();

        let first = tokio::spawn({
            let engine = Arc::clone(&engine);
            async move { engine.answer(ALICE, choice).await }
        });
        let second = tokio::spawn({
            let engine = Arc::clone(&engine);
            async move { engine.answer(ALICE, choice).await }
        });
        let replies = [first.await.unwrap(), second.await.unwrap()];

        let verdicts = replies
            .iter()
            .filter(|reply| matches!(reply, AnswerReply::Verdict(_)))
            .count();
        let refused = replies
            .iter()
            .filter(|reply| **reply == AnswerReply::NoActiveQuestion)
            .count();
        assert_eq!((verdicts, refused), (1, 1));
        assert_eq!(engine.score(ALICE).await, Score { score: 1, asked: 1 });
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_quizzes_count_every_question() {
    let engine = engine(7);
    engine.select_topic(ALICE, "gerundivo").await;

    let tasks: Vec<_> = (0..32)
        .map(|_| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.start_quiz(ALICE).await.unwrap() })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(engine.score(ALICE).await, Score { score: 0, asked: 32 });
}
