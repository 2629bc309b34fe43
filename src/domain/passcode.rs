//! APRS-IS login passcode derived from the base callsign (SSID stripped).

pub fn compute(callsign: &str) -> i32 {
    let base = callsign
        .trim()
        .split('-')
        .next()
        .unwrap_or_default()
        .to_uppercase();

    let mut hash: i32 = 0x73e2;
    for pair in base.as_bytes().chunks(2) {
        hash ^= i32::from(pair[0]) << 8;
        if let Some(&low) = pair.get(1) {
            hash ^= i32::from(low);
        }
    }
    hash & 0x7fff
}
