/// `1234567` -> `"1,234,567"`
pub fn group_thousands<N: Into<u128>>(n: N) -> String {
    let digits = n.into().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Signed, grouped: `+1,024`, `-3`, `+0`.
pub fn signed_thousands(n: i128) -> String {
    let sign = if n < 0 { '-' } else { '+' };
    format!("{sign}{}", group_thousands(n.unsigned_abs()))
}
