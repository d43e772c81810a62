use std::net::SocketAddr;

use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::Serialize;

/// API Client
pub struct Client {
    bind_address: SocketAddr,
    base_path: String,
}

impl Client {
    pub fn new(bind_address: SocketAddr) -> Self {
        Self {
            bind_address,
            base_path: "/api/v1/".to_string(),
        }
    }

    pub async fn create_transfer(&self, file_name: &str, descriptor: Vec<u8>, query: &[(&str, &str)]) -> Response {
        let form = Form::new().part("file", Part::bytes(descriptor).file_name(file_name.to_owned()));

        reqwest::Client::new()
            .post(self.base_url("transfers"))
            .query(query)
            .multipart(form)
            .send()
            .await
            .unwrap()
    }

    pub async fn get_transfers(&self) -> Response {
        self.get("transfers").await
    }

    pub async fn get_transfer(&self, id: &str) -> Response {
        self.get(&format!("transfers/{id}")).await
    }

    pub async fn pause_transfer(&self, id: &str) -> Response {
        self.post_empty(&format!("transfers/{id}/pause"), &[]).await
    }

    pub async fn resume_transfer(&self, id: &str) -> Response {
        self.post_empty(&format!("transfers/{id}/resume"), &[]).await
    }

    pub async fn update_transfer<T: Serialize + ?Sized>(&self, id: &str, form: &T) -> Response {
        reqwest::Client::new()
            .put(self.base_url(&format!("transfers/{id}")))
            .json(form)
            .send()
            .await
            .unwrap()
    }

    pub async fn delete_transfer(&self, id: &str) -> Response {
        reqwest::Client::new()
            .delete(self.base_url(&format!("transfers/{id}")))
            .send()
            .await
            .unwrap()
    }

    pub async fn get_stats(&self) -> Response {
        self.get("stats").await
    }

    pub async fn set_global_limits(&self, query: &[(&str, &str)]) -> Response {
        self.post_empty("settings/global-limits", query).await
    }

    pub async fn get(&self, path: &str) -> Response {
        reqwest::Client::new().get(self.base_url(path)).send().await.unwrap()
    }

    pub async fn post_empty(&self, path: &str, query: &[(&str, &str)]) -> Response {
        reqwest::Client::new()
            .post(self.base_url(path))
            .query(query)
            .send()
            .await
            .unwrap()
    }

    /// The URL of the push channel.
    pub fn push_url(&self) -> String {
        format!("ws://{}{}ws", self.bind_address, self.base_path)
    }

    fn base_url(&self, path: &str) -> String {
        format!("http://{}{}{path}", self.bind_address, self.base_path)
    }
}

/// A plain `GET` to any URL of the server.
pub async fn get(url: &str) -> Response {
    reqwest::Client::builder().build().unwrap().get(url).send().await.unwrap()
}
