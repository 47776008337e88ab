use chrono::NaiveDateTime;
use utoipa::ToSchema;

/// Temporal state of an event. The enum order is the dashboard sort order:
/// ongoing events first, then upcoming, ended last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize, ToSchema)]
pub enum EventStatus {
    #[serde(rename = "On Going")]
    OnGoing,
    #[serde(rename = "Up Coming")]
    UpComing,
    #[serde(rename = "Ended")]
    Ended,
}

/// Both boundaries count as ongoing.
pub fn event_status(start_time: NaiveDateTime, end_time: NaiveDateTime, now: NaiveDateTime) -> EventStatus {
    if start_time <= now && now <= end_time {
        EventStatus::OnGoing
    } else if now < start_time {
        EventStatus::UpComing
    } else {
        EventStatus::Ended
    }
}

/// Average rounded to one decimal place through its string form, the same
/// value the dashboard displays. Empty input averages to 0.
pub fn average_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }

    let sum: i32 = ratings.iter().sum();
    let average = f64::from(sum) / ratings.len() as f64;
    format!("{average:.1}").parse().unwrap_or(average)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use super::{average_rating, event_status, EventStatus};

    fn at(hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn classifies_around_the_event_window() {
        assert_eq!(event_status(at(10), at(12), at(9)), EventStatus::UpComing);
        assert_eq!(event_status(at(10), at(12), at(11)), EventStatus::OnGoing);
        assert_eq!(event_status(at(10), at(12), at(13)), EventStatus::Ended);
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        assert_eq!(event_status(at(10), at(12), at(10)), EventStatus::OnGoing);
        assert_eq!(event_status(at(10), at(12), at(12)), EventStatus::OnGoing);
        // Degenerate window where start == end == now still counts as ongoing.
        assert_eq!(event_status(at(10), at(10), at(10)), EventStatus::OnGoing);
    }

    #[test]
    fn status_sorts_ongoing_before_upcoming_before_ended() {
        let mut statuses = vec![EventStatus::Ended, EventStatus::OnGoing, EventStatus::UpComing];
        statuses.sort();
        assert_eq!(statuses, vec![EventStatus::OnGoing, EventStatus::UpComing, EventStatus::Ended]);
    }

    #[test]
    fn status_serializes_as_display_strings() {
        assert_eq!(serde_json::to_value(EventStatus::OnGoing).unwrap(), "On Going");
        assert_eq!(serde_json::to_value(EventStatus::UpComing).unwrap(), "Up Coming");
        assert_eq!(serde_json::to_value(EventStatus::Ended).unwrap(), "Ended");
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        assert_eq!(average_rating(&[5, 5, 5, 4]), 4.8);
        assert_eq!(average_rating(&[1, 2]), 1.5);
        assert_eq!(average_rating(&[3]), 3.0);
    }

    #[test]
    fn empty_rating_set_averages_to_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }
}
