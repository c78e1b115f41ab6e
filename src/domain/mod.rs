//! Domain layer: messages, recipients and routing (no I/O).

mod message;
mod response;
mod route;
mod validation;
mod value;

pub use message::{Outgoing, SmsMessage};
pub use response::{HttpResponse, SendOutcome};
pub use route::{AnonymousNotifiable, Notifiable};
pub use validation::ValidationError;
pub use value::Recipient;

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};

    use super::*;

    fn vars(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn content_is_not_pattern() {
        let message = SmsMessage::text("hello");
        assert!(!message.is_pattern());
        assert_eq!(message.content.as_deref(), Some("hello"));
    }

    #[test]
    fn pattern_is_pattern() {
        let message = SmsMessage::with_pattern("abc", Map::new());
        assert!(message.is_pattern());
        assert_eq!(message.variables, Some(Map::new()));
    }

    #[test]
    fn empty_pattern_code_is_not_pattern() {
        let message = SmsMessage::with_pattern("", Map::new());
        assert!(!message.is_pattern());
        assert!(!SmsMessage::new().is_pattern());
    }

    #[test]
    fn content_after_pattern_clears_pattern_fields() {
        let message = SmsMessage::new()
            .pattern("X", Map::new())
            .content("Y");
        assert!(!message.is_pattern());
        assert_eq!(message.pattern_code, None);
        assert_eq!(message.variables, None);
        assert_eq!(message.content.as_deref(), Some("Y"));
    }

    #[test]
    fn pattern_after_content_clears_content() {
        let message = SmsMessage::text("Y").pattern("X", vars(json!({"a": 1})));
        assert!(message.is_pattern());
        assert_eq!(message.content, None);
    }

    #[test]
    fn variable_initializes_map_before_pattern() {
        let message = SmsMessage::new()
            .variable("name", "John Doe")
            .variable("code", 12345);
        assert!(!message.is_pattern());
        assert_eq!(
            message.variables,
            Some(vars(json!({"name": "John Doe", "code": 12345})))
        );
    }

    #[test]
    fn variable_upserts_existing_key() {
        let message = SmsMessage::with_pattern("p", vars(json!({"code": "1"}))).variable("code", "2");
        assert_eq!(message.variables, Some(vars(json!({"code": "2"}))));
    }

    #[test]
    fn plain_setters_do_not_touch_mode() {
        let message = SmsMessage::text("hi")
            .sender("+983000789")
            .recipient(["+989120000001", "+989120000002"])
            .at("2025-03-21T09:12:50.824Z");
        assert_eq!(message.content.as_deref(), Some("hi"));
        assert_eq!(message.sender.as_deref(), Some("+983000789"));
        assert_eq!(
            message.recipient,
            Some(Recipient::Many(vec![
                "+989120000001".to_owned(),
                "+989120000002".to_owned()
            ]))
        );
        assert_eq!(
            message.scheduled_at.as_deref(),
            Some("2025-03-21T09:12:50.824Z")
        );
    }

    #[test]
    fn recipient_emptiness() {
        assert!(Recipient::from("  ").is_empty());
        assert!(Recipient::Many(Vec::new()).is_empty());
        assert!(!Recipient::from("+989120000001").is_empty());
        assert_eq!(
            Recipient::from("+989120000001").into_vec(),
            vec!["+989120000001".to_owned()]
        );
    }

    #[test]
    fn outgoing_describes_what_was_given() {
        assert_eq!(Outgoing::from("hi").describe(), "a plain string (\"hi\")");
        assert_eq!(
            Outgoing::from(vec!["not a message"]).describe(),
            "Unknown"
        );
        assert_eq!(Outgoing::from(json!(42)).describe(), "Unknown");
        assert_eq!(Outgoing::from(json!("hi")), Outgoing::Text("hi".to_owned()));
        assert_eq!(Outgoing::unrecognized(&42_u8).describe(), "u8");
    }

    #[test]
    fn strings_route_to_themselves() {
        assert_eq!(
            "+989120000001".as_recipient(),
            Some(Recipient::One("+989120000001".to_owned()))
        );
        let numbers = vec!["+989120000001".to_owned(), "+989120000002".to_owned()];
        assert_eq!(numbers.as_recipient(), Some(Recipient::Many(numbers.clone())));
    }

    #[test]
    fn json_targets_expose_fields_and_homogeneous_lists() {
        let user = json!({"phone_number": "+989120000001", "mobile": "+989120000002"});
        assert_eq!(user.phone_number().as_deref(), Some("+989120000001"));
        assert_eq!(user.mobile().as_deref(), Some("+989120000002"));
        assert_eq!(user.as_recipient(), None);

        assert_eq!(
            json!(["+989120000001", "+989120000002"]).as_recipient(),
            Some(Recipient::from(vec!["+989120000001", "+989120000002"]))
        );
        assert_eq!(json!(["+989120000001", 7]).as_recipient(), None);
        assert_eq!(json!(12).as_recipient(), None);
    }

    #[test]
    fn anonymous_notifiable_routes_by_channel() {
        let target = AnonymousNotifiable::new().route("persianSms", "+989120000001");
        assert_eq!(
            target.route_notification_for("persianSms"),
            Some(Recipient::from("+989120000001"))
        );
        assert_eq!(target.route_notification_for("mail"), None);
        assert_eq!(target.phone_number(), None);
    }

    #[test]
    fn data_reads_envelope_payload() {
        let response = HttpResponse {
            status: 200,
            body: r#"{"status":"OK","data":{"message_id":"12345"}}"#.to_owned(),
        };
        assert_eq!(response.data(), Some(json!({"message_id": "12345"})));

        let garbage = HttpResponse {
            status: 200,
            body: "not json".to_owned(),
        };
        assert_eq!(garbage.json(), None);
        assert_eq!(garbage.data(), None);
    }
}
