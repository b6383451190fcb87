use serde::{Deserialize, Serialize};

pub const SUBJECT_COUNT: usize = 7;
pub const MAX_SCORE: i32 = 100;
const MAX_TOTAL: f64 = (SUBJECT_COUNT as i32 * MAX_SCORE) as f64;

/// 七门科目成绩
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectScores {
    pub subject1: i32,
    pub subject2: i32,
    pub subject3: i32,
    pub subject4: i32,
    pub subject5: i32,
    pub subject6: i32,
    pub subject7: i32,
}

impl SubjectScores {
    pub fn as_array(&self) -> [i32; SUBJECT_COUNT] {
        [
            self.subject1,
            self.subject2,
            self.subject3,
            self.subject4,
            self.subject5,
            self.subject6,
            self.subject7,
        ]
    }

    pub fn from_array(s: [i32; SUBJECT_COUNT]) -> Self {
        Self {
            subject1: s[0],
            subject2: s[1],
            subject3: s[2],
            subject4: s[3],
            subject5: s[4],
            subject6: s[5],
            subject7: s[6],
        }
    }

    /// 每门必须在 0..=100 之间
    pub fn validate(&self) -> Result<(), String> {
        for (i, score) in self.as_array().iter().enumerate() {
            if !(0..=MAX_SCORE).contains(score) {
                return Err(format!(
                    "subject{} score {} is out of range 0-{}",
                    i + 1,
                    score,
                    MAX_SCORE
                ));
            }
        }
        Ok(())
    }

    /// 由成绩推导总分、百分比和等级，纯函数
    pub fn summarize(&self) -> ResultSummary {
        let total: i32 = self.as_array().iter().sum();
        let percentage = total as f64 / MAX_TOTAL * 100.0;
        ResultSummary {
            total,
            percentage,
            grade: Grade::from_percentage(percentage),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    F,
}

impl Grade {
    /// 阈值为闭区间下界，从高到低取第一个满足的
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Grade::APlus
        } else if percentage >= 80.0 {
            Grade::A
        } else if percentage >= 70.0 {
            Grade::B
        } else if percentage >= 60.0 {
            Grade::C
        } else {
            Grade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        }
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A+" => Ok(Grade::APlus),
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "F" => Ok(Grade::F),
            _ => Err(format!("Invalid grade: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResultSummary {
    pub total: i32,
    pub percentage: f64,
    pub grade: Grade,
}

// 成绩单
#[derive(Debug, Clone, Serialize)]
pub struct StudentResult {
    pub id: i64,
    pub student_id: i64,
    #[serde(flatten)]
    pub scores: SubjectScores,
    pub total: i32,
    pub percentage: f64,
    pub grade: Grade,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(score: i32) -> SubjectScores {
        SubjectScores::from_array([score; SUBJECT_COUNT])
    }

    #[test]
    fn test_all_ninety_is_a_plus() {
        let summary = uniform(90).summarize();
        assert_eq!(summary.total, 630);
        assert!((summary.percentage - 90.0).abs() < 1e-9);
        assert_eq!(summary.grade, Grade::APlus);
    }

    #[test]
    fn test_all_sixty_is_c() {
        let summary = uniform(60).summarize();
        assert_eq!(summary.total, 420);
        assert!((summary.percentage - 60.0).abs() < 1e-9);
        assert_eq!(summary.grade, Grade::C);
    }

    #[test]
    fn test_all_fifty_is_f() {
        let summary = uniform(50).summarize();
        assert_eq!(summary.total, 350);
        assert!((summary.percentage - 50.0).abs() < 1e-9);
        assert_eq!(summary.grade, Grade::F);
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        assert_eq!(Grade::from_percentage(80.0), Grade::A);
        assert_eq!(Grade::from_percentage(79.99), Grade::B);
        assert_eq!(Grade::from_percentage(70.0), Grade::B);
        assert_eq!(Grade::from_percentage(100.0), Grade::APlus);
        assert_eq!(Grade::from_percentage(0.0), Grade::F);
    }

    #[test]
    fn test_summary_is_deterministic() {
        let scores = SubjectScores::from_array([91, 78, 66, 85, 100, 59, 73]);
        assert_eq!(scores.summarize(), scores.summarize());
        assert_eq!(scores.summarize().total, 552);
    }

    #[test]
    fn test_out_of_range_scores_rejected() {
        assert!(uniform(100).validate().is_ok());
        assert!(uniform(0).validate().is_ok());

        let err = SubjectScores::from_array([10, 20, 101, 40, 50, 60, 70])
            .validate()
            .unwrap_err();
        assert!(err.contains("subject3"));
        assert!(
            SubjectScores::from_array([-1, 0, 0, 0, 0, 0, 0])
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_grade_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
        assert_eq!("A+".parse::<Grade>().unwrap(), Grade::APlus);
    }
}
