use creationary::domain::forms::{LoginForm, PostDraft, SignUpForm};
use creationary::utils::validation::Validate;
use creationary::CreationaryError;

fn valid_post() -> PostDraft {
    PostDraft {
        title: "Valid Test Title".to_string(),
        description: "This is a valid description that meets the minimum length requirement"
            .to_string(),
        content: "This is valid content that is definitely long enough to pass validation"
            .to_string(),
        features: vec!["Feature 1".to_string(), "Feature 2".to_string()],
        category: "Technology".to_string(),
        price: 29.99,
        original_price: Some(39.99),
    }
}

fn first_message(result: creationary::Result<()>) -> String {
    match result {
        Err(CreationaryError::ValidationError { message, .. }) => message,
        other => panic!("expected validation error, got {:?}", other),
    }
}

fn valid_sign_up() -> SignUpForm {
    SignUpForm {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email: "john.doe@example.com".to_string(),
        password: "ValidPass123!".to_string(),
    }
}

#[test]
fn test_valid_post() {
    assert!(valid_post().validate().is_ok());
}

#[test]
fn test_post_field_minimums() {
    let post = PostDraft { title: "sm".to_string(), ..valid_post() };
    assert!(first_message(post.validate()).contains("at least 5 characters"));

    let post = PostDraft { description: "Too short".to_string(), ..valid_post() };
    assert!(first_message(post.validate()).contains("at least 10 characters"));

    let post = PostDraft { content: "Too short content".to_string(), ..valid_post() };
    assert!(first_message(post.validate()).contains("at least 20 characters"));
}

#[test]
fn test_post_requires_feature() {
    let post = PostDraft { features: vec![], ..valid_post() };
    assert!(first_message(post.validate()).contains("At least one feature"));
}

#[test]
fn test_post_rejects_negative_price() {
    let post = PostDraft { price: -10.0, ..valid_post() };
    assert!(first_message(post.validate()).contains("positive number"));

    let post = PostDraft { price: f64::NAN, ..valid_post() };
    assert!(post.validate().is_err());
}

#[test]
fn test_post_accepts_missing_original_price() {
    let post = PostDraft { original_price: None, ..valid_post() };
    assert!(post.validate().is_ok());
}

#[test]
fn test_post_check_reports_every_field() {
    let post = PostDraft {
        title: "sm".to_string(),
        features: vec![],
        price: -1.0,
        ..valid_post()
    };
    let errors = post.check();
    assert_eq!(errors.len(), 3);
    assert!(errors.contains("title"));
    assert!(errors.contains("features"));
    assert!(errors.contains("price"));
}

#[test]
fn test_valid_sign_up() {
    assert!(valid_sign_up().validate().is_ok());

    let padded = SignUpForm { email: "  john.doe@example.com ".to_string(), ..valid_sign_up() };
    assert!(padded.validate().is_ok());
}

#[test]
fn test_sign_up_rejections() {
    let cases = [
        SignUpForm { first_name: "Jo".to_string(), ..valid_sign_up() },
        SignUpForm { email: "invalid-email".to_string(), ..valid_sign_up() },
        SignUpForm { password: "ValidPass123".to_string(), ..valid_sign_up() },
        SignUpForm { password: "ValidPass!".to_string(), ..valid_sign_up() },
        SignUpForm { password: "12345678!".to_string(), ..valid_sign_up() },
    ];
    for form in cases {
        assert!(form.validate().is_err(), "{:?} should be rejected", form);
    }
}

#[test]
fn test_login() {
    let valid = LoginForm {
        email: "john.doe@example.com".to_string(),
        password: "ValidPass123!".to_string(),
    };
    assert!(valid.validate().is_ok());

    let empty = LoginForm { email: String::new(), ..valid.clone() };
    assert_eq!(first_message(empty.validate()), "Email is required");

    let bad = LoginForm { email: "not-an-email".to_string(), ..valid.clone() };
    assert!(bad.validate().is_err());

    let short = LoginForm { password: "short".to_string(), ..valid };
    assert_eq!(first_message(short.validate()), "Be at least 8 characters long");
}
