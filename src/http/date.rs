use std::time::{SystemTime, UNIX_EPOCH};

const DAY_NAMES: [&[u8; 3]; 7] = [b"Thu", b"Fri", b"Sat", b"Sun", b"Mon", b"Tue", b"Wed"];

const MONTH_NAMES: [&[u8; 3]; 12] = [
    b"Jan", b"Feb", b"Mar", b"Apr", b"May", b"Jun", b"Jul", b"Aug", b"Sep", b"Oct", b"Nov", b"Dec",
];

/// Create [httpdate][rfc] for current time.
///
/// [rfc]: <https://datatracker.ietf.org/doc/html/rfc9110#section-5.6.7>
#[inline]
pub fn httpdate_now() -> [u8; 29] {
    httpdate(SystemTime::now())
}

/// Create [httpdate][rfc] with given time.
///
/// Time before the unix epoch is clamped to the epoch.
///
/// [rfc]: <https://datatracker.ietf.org/doc/html/rfc9110#section-5.6.7>
pub fn httpdate(time: SystemTime) -> [u8; 29] {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map(|e| e.as_secs())
        .unwrap_or_default()
        // 9999-12-31T23:59:59
        .min(253_402_300_799);

    let days = secs / 86_400;
    let secs_of_day = secs % 86_400;
    let (year, month, day) = civil_from_days(days);

    let mut buf: [u8; 29] = *b"ddd, 00 mmm 0000 00:00:00 GMT";

    buf[..3].copy_from_slice(DAY_NAMES[(days % 7) as usize]);
    put_2digit(&mut buf[5..7], day);
    buf[8..11].copy_from_slice(MONTH_NAMES[(month - 1) as usize]);
    put_2digit(&mut buf[12..14], (year / 100) as u32);
    put_2digit(&mut buf[14..16], (year % 100) as u32);
    put_2digit(&mut buf[17..19], (secs_of_day / 3600) as u32);
    put_2digit(&mut buf[20..22], (secs_of_day % 3600 / 60) as u32);
    put_2digit(&mut buf[23..25], (secs_of_day % 60) as u32);

    buf
}

fn put_2digit(buf: &mut [u8], value: u32) {
    buf[0] = b'0' + (value / 10) as u8;
    buf[1] = b'0' + (value % 10) as u8;
}

/// Convert days since the unix epoch into `(year, month, day)`.
///
/// Era based conversion where each era is 400 years, starting at 0000-03-01.
fn civil_from_days(days: u64) -> (u64, u32, u32) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};
    use super::httpdate;

    #[test]
    fn test_httpdate() {
        let d = UNIX_EPOCH;
        assert_eq!(std::str::from_utf8(&httpdate(d)), Ok("Thu, 01 Jan 1970 00:00:00 GMT"));
        let d = UNIX_EPOCH + Duration::from_secs(1475419451);
        assert_eq!(std::str::from_utf8(&httpdate(d)), Ok("Sun, 02 Oct 2016 14:44:11 GMT"));
        let d = UNIX_EPOCH + Duration::from_secs(951_782_400);
        assert_eq!(std::str::from_utf8(&httpdate(d)), Ok("Tue, 29 Feb 2000 00:00:00 GMT"));
    }
}
