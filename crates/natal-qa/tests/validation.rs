use natal_qa::{
    AnswerValue, ImageChoice, QuestionSpec, REQUIRED_MESSAGE, ValidationError, ValidationOutcome,
    validate,
};

fn as_text(value: &str) -> AnswerValue {
    AnswerValue::Text(value.into())
}

fn as_choice(value: &str) -> AnswerValue {
    AnswerValue::Choice(value.into())
}

fn as_image(value: &str) -> AnswerValue {
    AnswerValue::Image(value.into())
}

type MakeValue = fn(&str) -> AnswerValue;

fn required_string_questions() -> Vec<(QuestionSpec, MakeValue)> {
    vec![
        (QuestionSpec::text("nombre", "Nombre"), as_text as MakeValue),
        (
            QuestionSpec::select("lecturas", "Lecturas", ["Nunca", "A veces"]),
            as_choice as MakeValue,
        ),
        (
            QuestionSpec::imagepick(
                "escenario_vital",
                "Escenario",
                vec![ImageChoice::new("astros", "https://example.test/astros.jpg")],
            ),
            as_image as MakeValue,
        ),
    ]
}

#[test]
fn absent_or_blank_values_fail_presence() {
    for (question, make) in required_string_questions() {
        assert_eq!(
            validate(&question, None),
            ValidationOutcome::Invalid(ValidationError::Required),
            "{} absent",
            question.id
        );
        for blank in ["", "   ", "\t\n"] {
            let outcome = validate(&question, Some(&make(blank)));
            assert_eq!(
                outcome.message().as_deref(),
                Some(REQUIRED_MESSAGE),
                "{} blank {blank:?}",
                question.id
            );
        }
    }
}

#[test]
fn non_empty_values_pass_presence() {
    for (question, make) in required_string_questions() {
        for value in ["x", " Nunca ", "astros"] {
            assert!(
                validate(&question, Some(&make(value))).is_valid(),
                "{} with {value:?}",
                question.id
            );
        }
    }
}

#[test]
fn multiselect_presence_requires_one_choice() {
    let question = QuestionSpec::multiselect("emociones", "Emociones", ["Calma", "Alegría"], None);
    assert!(!validate(&question, Some(&AnswerValue::Choices(vec![]))).is_valid());
    assert!(validate(&question, Some(&AnswerValue::Choices(vec!["Calma".into()]))).is_valid());
}

#[test]
fn likert_presence_only_needs_a_number() {
    let question = QuestionSpec::likert("bienestar", "Bienestar", 1, 5);
    assert_eq!(
        validate(&question, None).error(),
        Some(&ValidationError::Required)
    );
    assert!(validate(&question, Some(&AnswerValue::Scale(3))).is_valid());
}

#[test]
fn presence_wins_over_min_len() {
    let question = QuestionSpec::text("proposito", "Propósito").with_min_len(10);
    assert_eq!(
        validate(&question, Some(&AnswerValue::Text("  ".into()))),
        ValidationOutcome::Invalid(ValidationError::Required)
    );
    assert_eq!(
        validate(&question, Some(&AnswerValue::Text("corto".into())))
            .message()
            .as_deref(),
        Some("Mínimo 10 caracteres")
    );
    assert!(validate(&question, Some(&AnswerValue::Text("aprender a escuchar".into()))).is_valid());
}

#[test]
fn optional_questions_accept_absence() {
    let question = QuestionSpec::text("futuro", "Futuro").optional();
    assert!(validate(&question, None).is_valid());
    assert!(validate(&question, Some(&AnswerValue::Text(String::new()))).is_valid());

    let select = QuestionSpec::select("creencias", "Creencias", ["Ninguna", "Otro"]).optional();
    assert!(validate(&select, None).is_valid());
}

#[test]
fn optional_text_with_min_len_checks_supplied_values() {
    let question = QuestionSpec::text("apodo", "Apodo").with_min_len(3).optional();
    assert!(validate(&question, None).is_valid());
    assert_eq!(
        validate(&question, Some(&AnswerValue::Text("ab".into()))),
        ValidationOutcome::Invalid(ValidationError::MinLength { min: 3 })
    );
    assert_eq!(
        validate(&question, Some(&AnswerValue::Text(String::new()))),
        ValidationOutcome::Invalid(ValidationError::MinLength { min: 3 })
    );
}

#[test]
fn validator_trusts_membership() {
    let question = QuestionSpec::select("lecturas", "Lecturas", ["Nunca"]);
    assert!(validate(&question, Some(&AnswerValue::Choice("Siempre".into()))).is_valid());
}
