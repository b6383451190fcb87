use serde::Serialize;

// 头像上传结果，reference 写入学生/教师档案的 profile_image
#[derive(Debug, Serialize)]
pub struct ImageUploadResponse {
    pub reference: String,
    pub size: u64,
    pub content_type: String,
}
