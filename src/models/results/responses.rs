use super::entities::StudentResult;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub result: StudentResult,
}
