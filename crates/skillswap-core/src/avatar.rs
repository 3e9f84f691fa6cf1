//! Resolve a stored `profile_picture` value to something a client can load.

const LEGACY_DEFAULT: &str = "default-avatar.png";
const GENERATED_AVATAR_BASE: &str = "https://ui-avatars.com/api/";

pub fn avatar_url(profile_picture: Option<&str>, full_name: &str) -> String {
    match profile_picture {
        Some(pic)
            if !pic.is_empty() && pic != LEGACY_DEFAULT && !pic.starts_with(GENERATED_AVATAR_BASE) =>
        {
            if pic.starts_with("http") || pic.starts_with('/') {
                pic.to_string()
            } else if pic.starts_with("static/") {
                format!("/{}", pic)
            } else {
                format!("/static/uploads/profile_pics/{}", pic)
            }
        }
        _ => format!(
            "{}?name={}&background=random",
            GENERATED_AVATAR_BASE,
            initials(full_name)
        ),
    }
}

fn initials(full_name: &str) -> String {
    let names: Vec<&str> = full_name.split_whitespace().collect();
    match names.as_slice() {
        [] => "SS".to_string(),
        [only] => only.chars().take(2).collect(),
        [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
    }
}
