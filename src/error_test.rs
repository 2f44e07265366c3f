use super::*;

#[test]
fn input_variants_classify_as_input() {
    assert_eq!(Error::invalid_selector("", "empty selector").kind(), ErrorKind::Input);
    assert_eq!(Error::InvalidRange { min: 3, max: 1 }.kind(), ErrorKind::Input);
    assert_eq!(Error::MalformedEncoding("%zz".into()).kind(), ErrorKind::Input);
    assert_eq!(Error::InvalidExpiry(i64::MAX).kind(), ErrorKind::Input);
}

#[test]
fn environment_variants_classify_as_environment() {
    assert_eq!(Error::Unavailable("analytics collector").kind(), ErrorKind::Environment);
    assert_eq!(Error::Dom("detached".into()).kind(), ErrorKind::Environment);
}

#[test]
fn timeout_classifies_as_timeout() {
    assert_eq!(Error::Timeout(Duration::from_secs(10)).kind(), ErrorKind::Timeout);
}

#[test]
fn display_messages_name_the_problem() {
    assert_eq!(
        Error::InvalidRange { min: 5, max: 2 }.to_string(),
        "invalid range: min 5 is greater than max 2"
    );
    assert_eq!(
        Error::Timeout(Duration::from_millis(10_000)).to_string(),
        "condition not met within 10000ms"
    );
    assert_eq!(
        Error::invalid_selector("#", "missing name").to_string(),
        "invalid selector `#`: missing name"
    );
}
