use akamai_token::{TokenBuilder, TokenError, TokenParams};

fn main() -> Result<(), TokenError> {
    // Example 1: Path ACL for a live channel, valid for 10 minutes
    println!("Example 1: ACL token");
    let params = TokenParams::new()
        .window(600)
        .acl("/live/channel1/*")
        .key("0123456789abcdef0123456789abcdef");
    let builder = TokenBuilder::new(params)?;
    println!("raw token:    {}", builder.raw_token());
    println!("signed token: {}\n", builder.encrypted_token()?);

    // Example 2: Single URL, bound to a client IP and session
    println!("Example 2: URL token");
    let params = TokenParams::new()
        .url("/vod/movie.mp4")
        .ip("203.0.113.7")
        .session_id("session-42")
        .salt("edge-salt")
        .key("0123456789abcdef0123456789abcdef");
    let builder = TokenBuilder::new(params)?;
    println!("signing payload: {}", builder.trimmed_token_digest());
    println!("signed token:    {}\n", builder.encrypted_token()?);

    // Example 3: Rejected configuration
    println!("Example 3: ACL and URL together");
    let params = TokenParams::new().acl("/live/*").url("/vod/movie.mp4");
    match TokenBuilder::new(params) {
        Ok(_) => println!("unexpectedly accepted"),
        Err(e) => println!("rejected: {}", e),
    }

    Ok(())
}
