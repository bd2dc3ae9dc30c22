//! 适配器测试用的本地 HTTP 服务

use axum::Router;

/// 在临时端口启动 mock 服务，返回 `http://127.0.0.1:port`
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
