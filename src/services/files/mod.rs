pub mod download;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

/// 头像文件，只落盘不入库，返回的引用由学生/教师档案保存
pub struct FileService;

impl FileService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 上传头像
    pub async fn upload_image(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(request, payload).await
    }

    // 按引用下载头像
    pub async fn download_image(&self, reference: String) -> ActixResult<HttpResponse> {
        download::handle_download(reference).await
    }
}
