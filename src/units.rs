pub mod rounding {
    /// Rounds a metric reading to the integer shown on screen.
    ///
    /// Halves round up (towards positive infinity), so `-2.5` becomes `-2`
    /// and `2.5` becomes `3`. Non-finite input rounds to `0`.
    pub fn display(value: f64) -> i32 {
        if !value.is_finite() {
            return 0;
        }
        (value + 0.5).floor() as i32
    }

    /// Like [`display`], but a missing reading counts as zero.
    pub fn display_or_zero(value: Option<f64>) -> i32 {
        value.map(display).unwrap_or(0)
    }

    #[test]
    fn test_display() {
        assert_eq!(display(18.6), 19);
        assert_eq!(display(18.4), 18);
        assert_eq!(display(18.5), 19);
        assert_eq!(display(-2.5), -2);
        assert_eq!(display(-2.6), -3);
        assert_eq!(display(0.0), 0);
        assert_eq!(display(f64::NAN), 0);
    }

    #[test]
    fn test_display_or_zero() {
        assert_eq!(display_or_zero(None), 0);
        assert_eq!(display_or_zero(Some(72.4)), 72);
    }
}

pub mod speed {
    pub const KPH_UNIT: &str = "km/h";
}

pub mod temperature {
    pub const DEGREE: &str = "°";

    /// Formats an already rounded temperature, e.g. `19°`.
    pub fn degrees(value: i32) -> String {
        format!("{value}{DEGREE}")
    }

    #[test]
    fn test_degrees() {
        assert_eq!(degrees(19), "19°");
        assert_eq!(degrees(-3), "-3°");
    }
}
