use akamai_streaming::{
    generate_token, token_response, Target, TokenBuilder, TokenError, TokenParams,
};

const KEY: &str = "aabbccddeeff00112233445566778899";

#[test]
fn test_default_token_golden() {
    let token = generate_token(TokenParams::new().start_time(1000).key(KEY)).unwrap();
    assert_eq!(
        token,
        "st=1000~exp=1300~acl=%2f*~hmac=d90a931262653bc075fa6049ea7fb115a59f780738e9166275da5d3329994adc"
    );
}

#[test]
fn test_all_fields_golden() {
    let params = TokenParams::new()
        .start_time(1_600_000_000)
        .window(600)
        .key(KEY)
        .ip("127.0.0.1")
        .acl("/videos/*")
        .session_id("abc")
        .data("payload")
        .salt("pepper");

    let builder = TokenBuilder::new(params).unwrap();
    assert_eq!(
        builder.trimmed_token_digest(),
        "ip=127.0.0.1~st=1600000000~exp=1600000600~acl=/videos/*~id=abc~data=payload~salt=pepper"
    );
    assert_eq!(
        builder.encrypted_token().unwrap(),
        "ip=127.0.0.1~st=1600000000~exp=1600000600~acl=%2fvideos%2f*~id=abc~data=payload~hmac=119bea9c797fb93dcbcd9f101b7740e93f56f7f31d7d551eebb5529a762ebd4d"
    );
}

#[test]
fn test_url_token_golden() {
    let params = TokenParams::new()
        .start_time(0)
        .window(60)
        .key(KEY)
        .url("http://example.com/v.mp4");

    let builder = TokenBuilder::new(params).unwrap();
    assert_eq!(builder.target(), &Target::Url("http://example.com/v.mp4".into()));
    // The URL is signed, never sent, and leaves an empty ACL behind
    assert_eq!(
        builder.encrypted_token().unwrap(),
        "st=0~exp=60~acl=~hmac=1876ba5fd851b818408a97963e2779fe0b91b3604a88fd2384731d32a4b78a24"
    );
}

#[test]
fn test_validation_errors() {
    let cases = [
        (TokenParams::new().start_time(-1), "Invalid start time"),
        (
            TokenParams::new().start_time(4_294_967_296),
            "Invalid start time",
        ),
        (TokenParams::new().algo("sha128"), "Invalid crypto algorithm"),
        (
            TokenParams::new().acl("/*").url("http://example.com"),
            "Cannot set URL with ACL",
        ),
    ];

    for (params, message) in cases {
        let err = TokenBuilder::new(params).unwrap_err();
        assert_eq!(err.to_string(), message);
    }
}

#[test]
fn test_key_errors() {
    assert_eq!(
        TokenBuilder::new(TokenParams::new().key("abc")).unwrap_err(),
        TokenError::OddLengthHex
    );
    assert_eq!(
        TokenBuilder::new(TokenParams::new().key("zz zz")).unwrap_err(),
        TokenError::InvalidHexCharacters
    );
}

#[test]
fn test_mutation_after_construction() {
    let mut builder = TokenBuilder::new(TokenParams::new().start_time(1000).key(KEY)).unwrap();
    builder.set_url(Some("http://example.com".into())).unwrap();
    assert_eq!(
        builder.set_acl(Some("/*".into())),
        Err(TokenError::AclWithUrl)
    );

    builder.set_url(None).unwrap();
    builder.set_acl(Some("/*".into())).unwrap();
    assert_eq!(
        builder.encrypted_token().unwrap(),
        "st=1000~exp=1300~acl=%2f*~hmac=d90a931262653bc075fa6049ea7fb115a59f780738e9166275da5d3329994adc"
    );
}

#[test]
fn test_token_response() {
    let response = token_response(TokenParams::new().start_time(1000).window(10)).unwrap();
    assert_eq!(response["start_time"], 1000);
    assert_eq!(response["expiration"], 1010);
    assert!(response["token"]
        .as_str()
        .unwrap()
        .starts_with("st=1000~exp=1010~acl=%2f*~hmac="));
}
