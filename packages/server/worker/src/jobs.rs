use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    CalculateRegion {
        region_id: uuid::Uuid,
        score_date: Option<NaiveDate>,
    },
    CalculateAll {
        score_date: Option<NaiveDate>,
    },
}
