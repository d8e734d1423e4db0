/// Formats seconds as `HH:MM:SS`. Hours keep counting past 24.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_every_field() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(61), "00:01:01");
        assert_eq!(format_duration(3981), "01:06:21");
    }

    #[test]
    fn long_episodes() {
        assert_eq!(format_duration(100 * 3600 + 59), "100:00:59");
    }
}
