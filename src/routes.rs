use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};

use crate::store::{self, Author, Post, PostPatch};
use crate::{DbPool, DbPoolExt};

// ─── Errors ───

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

fn err(status: Status, msg: &str, code: &str) -> (Status, Json<ApiError>) {
    (status, Json(ApiError { error: msg.to_string(), code: code.to_string() }))
}

fn db_err(msg: &str) -> (Status, Json<ApiError>) {
    err(Status::InternalServerError, msg, "DB_ERROR")
}

// ─── Models ───

/// Read-view of a post. `author` is the derived display string, not the
/// stored first/last pair.
#[derive(Serialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created: String,
}

fn present(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        author: post.author.display_name(),
        created: post.created,
    }
}

// ─── Request bodies ───

#[derive(Deserialize)]
pub struct AuthorReq {
    #[serde(default, rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(default, rename = "lastName")]
    pub last_name: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePostReq {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorReq>,
}

#[derive(Deserialize)]
pub struct UpdatePostReq {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorReq>,
}

// ─── Routes ───

#[get("/health")]
pub fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

#[get("/posts")]
pub fn list_posts(db: &State<DbPool>) -> Result<Json<Vec<PostResponse>>, (Status, Json<ApiError>)> {
    let conn = db.conn();
    let posts = store::list(&conn).map_err(|e| db_err(&e.to_string()))?;
    Ok(Json(posts.into_iter().map(present).collect()))
}

#[get("/posts/<id>")]
pub fn get_post(id: &str, db: &State<DbPool>) -> Result<Json<PostResponse>, (Status, Json<ApiError>)> {
    let conn = db.conn();
    match store::get(&conn, id).map_err(|e| db_err(&e.to_string()))? {
        Some(post) => Ok(Json(present(post))),
        None => Err(err(Status::NotFound, "Post not found", "NOT_FOUND")),
    }
}

#[post("/posts", format = "json", data = "<req>")]
pub fn create_post(req: Json<CreatePostReq>, db: &State<DbPool>) -> Result<(Status, Json<PostResponse>), (Status, Json<ApiError>)> {
    let title = req.title.as_deref().unwrap_or("");
    if title.trim().is_empty() {
        return Err(err(Status::BadRequest, "Missing field: title", "VALIDATION_ERROR"));
    }
    let content = req.content.as_deref().unwrap_or("");
    if content.trim().is_empty() {
        return Err(err(Status::BadRequest, "Missing field: content", "VALIDATION_ERROR"));
    }

    let author = Author {
        first_name: req.author.as_ref().and_then(|a| a.first_name.clone()).unwrap_or_default(),
        last_name: req.author.as_ref().and_then(|a| a.last_name.clone()).unwrap_or_default(),
    };

    let conn = db.conn();
    let post = store::create(&conn, title, content, &author).map_err(|e| db_err(&e.to_string()))?;
    Ok((Status::Created, Json(present(post))))
}

#[put("/posts/<id>", format = "json", data = "<req>")]
pub fn update_post(id: &str, req: Json<UpdatePostReq>, db: &State<DbPool>) -> Result<(Status, Json<PostResponse>), (Status, Json<ApiError>)> {
    if req.id.as_deref() != Some(id) {
        return Err(err(
            Status::BadRequest,
            "Request path id and request body id must match",
            "VALIDATION_ERROR",
        ));
    }

    let patch = PostPatch {
        title: req.title.clone(),
        content: req.content.clone(),
        author_first_name: req.author.as_ref().and_then(|a| a.first_name.clone()),
        author_last_name: req.author.as_ref().and_then(|a| a.last_name.clone()),
    };

    let conn = db.conn();
    match store::update(&conn, id, &patch).map_err(|e| db_err(&e.to_string()))? {
        // Updates answer 201 rather than 200; existing clients depend on it.
        Some(post) => Ok((Status::Created, Json(present(post)))),
        None => Err(err(Status::NotFound, "Post not found", "NOT_FOUND")),
    }
}

#[delete("/posts/<id>")]
pub fn delete_post(id: &str, db: &State<DbPool>) -> Result<Status, (Status, Json<ApiError>)> {
    let conn = db.conn();
    if store::delete(&conn, id).map_err(|e| db_err(&e.to_string()))? {
        Ok(Status::NoContent)
    } else {
        Err(err(Status::NotFound, "Post not found", "NOT_FOUND"))
    }
}

// ─── Catchers ───

#[catch(400)]
pub fn bad_request() -> Json<ApiError> {
    Json(ApiError { error: "Bad request".to_string(), code: "VALIDATION_ERROR".to_string() })
}

#[catch(404)]
pub fn not_found() -> Json<ApiError> {
    Json(ApiError { error: "Not found".to_string(), code: "NOT_FOUND".to_string() })
}

#[catch(422)]
pub fn unprocessable() -> Json<ApiError> {
    Json(ApiError { error: "Malformed request body".to_string(), code: "VALIDATION_ERROR".to_string() })
}

#[catch(500)]
pub fn internal_error() -> Json<ApiError> {
    Json(ApiError { error: "Internal server error".to_string(), code: "INTERNAL_ERROR".to_string() })
}
