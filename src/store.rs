//! Resource store for blog posts. All functions take an explicit connection
//! handle; the caller owns locking and lifecycle.

use rusqlite::{Connection, OptionalExtension};

/// Structured author value as stored. The API's read-view of this is the
/// joined display string, never the raw pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Clone, Debug)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub created: String,
}

/// Fields of a partial update. `None` means "leave untouched".
#[derive(Debug, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
}

const POST_COLUMNS: &str = "id, title, content, author_first_name, author_last_name, created";

fn row_to_post(row: &rusqlite::Row) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        author: Author {
            first_name: row.get(3)?,
            last_name: row.get(4)?,
        },
        created: row.get(5)?,
    })
}

/// Inserts a new post, assigning `id` and `created`.
pub fn create(conn: &Connection, title: &str, content: &str, author: &Author) -> rusqlite::Result<Post> {
    let id = uuid::Uuid::new_v4().to_string();
    let created = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO posts (id, title, content, author_first_name, author_last_name, created)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![id, title, content, author.first_name, author.last_name, created],
    )?;
    Ok(Post {
        id,
        title: title.to_string(),
        content: content.to_string(),
        author: author.clone(),
        created,
    })
}

pub fn list(conn: &Connection) -> rusqlite::Result<Vec<Post>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM posts ORDER BY created, id",
        POST_COLUMNS
    ))?;
    let posts = stmt
        .query_map([], row_to_post)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(posts)
}

/// Looks up a post by id. Absence is `None`, not an error.
pub fn get(conn: &Connection, id: &str) -> rusqlite::Result<Option<Post>> {
    conn.query_row(
        &format!("SELECT {} FROM posts WHERE id = ?1", POST_COLUMNS),
        [id],
        row_to_post,
    )
    .optional()
}

/// Merges the supplied fields over the stored record. `id` and `created`
/// never change. Returns `None` if the id does not exist.
pub fn update(conn: &Connection, id: &str, patch: &PostPatch) -> rusqlite::Result<Option<Post>> {
    let current = match get(conn, id)? {
        Some(post) => post,
        None => return Ok(None),
    };

    let title = patch.title.as_deref().unwrap_or(&current.title);
    let content = patch.content.as_deref().unwrap_or(&current.content);
    let first_name = patch.author_first_name.as_deref().unwrap_or(&current.author.first_name);
    let last_name = patch.author_last_name.as_deref().unwrap_or(&current.author.last_name);

    conn.execute(
        "UPDATE posts SET title = ?1, content = ?2, author_first_name = ?3, author_last_name = ?4 WHERE id = ?5",
        rusqlite::params![title, content, first_name, last_name, id],
    )?;

    get(conn, id)
}

/// Removes a post by id, reporting whether a record existed.
pub fn delete(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    let deleted = conn.execute("DELETE FROM posts WHERE id = ?1", [id])?;
    Ok(deleted > 0)
}
