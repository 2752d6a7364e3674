use mentor_agent::{MentorPipeline, Pipeline, StudentAgent, TeacherAgent, STUDENT_SYSTEM_PROMPT};
use mentor_llm::{ErrorKind, ProviderConfig};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn student(server: &MockServer, key: Option<&str>) -> StudentAgent {
    StudentAgent::from_config(
        ProviderConfig::openrouter(key.map(String::from)).with_base_url(server.uri()),
    )
    .unwrap()
}

fn teacher(server: &MockServer, key: Option<&str>) -> TeacherAgent {
    TeacherAgent::from_config(ProviderConfig::gemini(key.map(String::from)).with_base_url(server.uri()))
        .unwrap()
}

async fn mount_student(server: &MockServer, answer: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"choices": [{"message": {"content": answer}}]})),
        )
        .mount(server)
        .await;
}

async fn mount_teacher(server: &MockServer, feedback: &str) {
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"candidates": [{"content": {"parts": [{"text": feedback}]}}]}),
        ))
        .mount(server)
        .await;
}

fn pipeline(student_server: &MockServer, teacher_server: &MockServer) -> MentorPipeline {
    Pipeline::new(
        student(student_server, Some("or-key")),
        teacher(teacher_server, Some("gm-key")),
    )
}

#[tokio::test]
async fn student_returns_first_choice_content() {
    let server = MockServer::start().await;
    mount_student(&server, "42").await;

    let answer = student(&server, Some("or-key")).answer("What is 6 x 7?").await.unwrap();
    assert_eq!(answer, "42");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], STUDENT_SYSTEM_PROMPT);
    assert_eq!(body["messages"][1]["content"], "What is 6 x 7?");
}

#[tokio::test]
async fn student_server_error_becomes_sentinel() {
    let student_server = MockServer::start().await;
    let teacher_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&student_server)
        .await;
    mount_teacher(&teacher_server, "Please try again").await;

    let report = pipeline(&student_server, &teacher_server).run("task").await;

    assert!(report.student_text().contains("Error in Student Agent"));
    assert_eq!(report.teacher_text(), "Please try again");
    assert_eq!(
        report.output("student").unwrap().result.as_ref().unwrap_err().kind(),
        ErrorKind::ApiFailed
    );
}

#[tokio::test]
async fn teacher_prompt_contains_task_and_answer() {
    let student_server = MockServer::start().await;
    let teacher_server = MockServer::start().await;
    mount_student(&student_server, "Paris is the capital").await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(query_param("key", "gm-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"candidates": [{"content": {"parts": [{"text": "Great job"}]}}]}),
        ))
        .expect(1)
        .mount(&teacher_server)
        .await;

    let report = pipeline(&student_server, &teacher_server)
        .run("Name the capital of France")
        .await;

    assert_eq!(report.student_text(), "Paris is the capital");
    assert_eq!(report.teacher_text(), "Great job");

    let requests = teacher_server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Name the capital of France"));
    assert!(prompt.contains("Paris is the capital"));
}

#[tokio::test]
async fn teacher_returns_first_candidate_text() {
    let server = MockServer::start().await;
    mount_teacher(&server, "Great job").await;

    let feedback = teacher(&server, Some("gm-key")).evaluate("task", "answer").await.unwrap();
    assert_eq!(feedback, "Great job");
}

#[tokio::test]
async fn missing_credentials_name_the_agent() {
    let student_server = MockServer::start().await;
    let teacher_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&student_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&teacher_server)
        .await;

    let pipeline = Pipeline::new(student(&student_server, None), teacher(&teacher_server, None));
    let report = pipeline.run("task").await;

    let student_text = report.student_text();
    assert!(student_text.contains("Student Agent"));
    assert!(student_text.contains("not found"));
    assert_eq!(
        student_text,
        "Error in Student Agent: OPENROUTER_API_KEY not found in environment variables"
    );

    let teacher_text = report.teacher_text();
    assert!(teacher_text.contains("Teacher Agent"));
    assert!(teacher_text.contains("not found"));
}

#[tokio::test]
async fn teacher_failure_keeps_student_output() {
    let student_server = MockServer::start().await;
    let teacher_server = MockServer::start().await;
    mount_student(&student_server, "an answer").await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&teacher_server)
        .await;

    let report = pipeline(&student_server, &teacher_server).run("task").await;

    assert_eq!(report.student_text(), "an answer");
    assert!(report.teacher_text().starts_with("Error in Teacher Agent: "));
}

#[tokio::test]
async fn blank_input_makes_no_calls() {
    let student_server = MockServer::start().await;
    let teacher_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&student_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&teacher_server)
        .await;

    let report = pipeline(&student_server, &teacher_server).run("  \n ").await;

    assert!(report.is_skipped());
    assert_eq!(report.student_text(), "");
    assert_eq!(report.teacher_text(), "");
}
