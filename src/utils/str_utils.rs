pub trait StringExtensions {
    /// Lowercases and turns every run of whitespace into a single hyphen.
    /// E.g. `"Costa  Rica".to_trip_id() == "costa-rica"`
    fn to_trip_id(&self) -> String;

    /// Uppercased and trimmed, for two-letter country codes typed by hand.
    fn to_country_code(&self) -> String;
}

impl StringExtensions for str {
    fn to_trip_id(&self) -> String {
        let mut id = String::with_capacity(self.len());
        let mut in_whitespace = false;
        for c in self.chars() {
            if c.is_whitespace() {
                if !in_whitespace {
                    id.push('-');
                }
                in_whitespace = true;
            } else {
                id.extend(c.to_lowercase());
                in_whitespace = false;
            }
        }
        id
    }

    fn to_country_code(&self) -> String {
        self.trim().to_uppercase()
    }
}

#[test]
fn test_to_trip_id() {
    assert_eq!("France".to_trip_id(), "france");
    assert_eq!("Costa Rica".to_trip_id(), "costa-rica");
    assert_eq!("Costa  Rica".to_trip_id(), "costa-rica");
    assert_eq!("United\tArab \n Emirates".to_trip_id(), "united-arab-emirates");
    assert_eq!("Côte d'Ivoire".to_trip_id(), "côte-d'ivoire");
    assert_eq!(" Peru".to_trip_id(), "-peru");
    assert_eq!("".to_trip_id(), "");
}

#[test]
fn test_to_country_code() {
    assert_eq!("fr".to_country_code(), "FR");
    assert_eq!(" jp ".to_country_code(), "JP");
}
