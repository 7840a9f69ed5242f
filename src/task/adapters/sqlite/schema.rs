//! Diesel schema for task persistence.

diesel::table! {
    /// Scheduled tasks.
    scheduler (id) {
        /// Store-assigned task identifier.
        id -> BigInt,
        /// Due date in `YYYYMMDD` form.
        date -> Text,
        /// Task title.
        title -> Text,
        /// Optional comment, empty when absent.
        comment -> Text,
        /// Recurrence rule, empty for one-shot tasks.
        repeat -> Text,
    }
}
