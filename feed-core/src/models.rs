use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Аватар, который показывается, если у автора он не задан.
pub const DEFAULT_AVATAR_URL: &str = "https://pill.city/kusuou.png";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
/// Автор поста.
pub struct Author {
    /// Идентификатор пользователя.
    pub id: String,
    /// URL аватара (может быть пустым).
    #[serde(default)]
    pub avatar_url: String,
    /// Имя картинки профиля.
    #[serde(default)]
    pub profile_pic: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
/// Пост из ленты удалённого сервиса.
///
/// Для пагинации используется только `id`, остальные поля передаются как есть.
pub struct Post {
    /// Идентификатор поста, он же курсор продолжения.
    pub id: String,
    /// Автор.
    pub author: Author,
    /// Текст поста.
    #[serde(default)]
    pub content: String,
    /// Время создания, секунды с начала эпохи.
    pub created_at_seconds: i64,
    /// Ссылки на вложенные изображения.
    #[serde(default)]
    pub media_urls: Vec<String>,
    /// Публичный ли пост.
    #[serde(default)]
    pub is_public: bool,
    /// Можно ли сделать репост.
    #[serde(default)]
    pub reshareable: bool,
    /// Круги, в которые опубликован пост.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub circles: Vec<Value>,
    /// Комментарии.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub comments: Vec<Value>,
    /// Реакции.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub reactions: Vec<Value>,
    /// Исходный пост, если это репост.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub reshared_from: Option<Value>,
}

impl Post {
    /// URL аватара автора или [`DEFAULT_AVATAR_URL`], если он пустой.
    pub fn avatar_or_default(&self) -> &str {
        let url = self.author.avatar_url.trim();
        if url.is_empty() {
            DEFAULT_AVATAR_URL
        } else {
            url
        }
    }
}

impl crate::pager::CursorKey for Post {
    fn cursor_key(&self) -> &str {
        &self.id
    }
}

/// Код успешного ответа в конверте.
pub const CODE_SUCCESS: i64 = 0;
/// Код ошибки входа (неверные данные или незаполненные поля).
pub const CODE_LOGIN_FAILED: i64 = 1;
/// Код отсутствующей или недействительной сессии.
pub const CODE_UNAUTHORIZED: i64 = 401;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Единый конверт ответов `/api/*`: `{code, message, data}`.
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    /// `0` при успехе, иначе код ошибки.
    pub code: i64,
    /// `"success"` или описание ошибки.
    pub message: String,
    /// Полезная нагрузка, только при успехе.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Успешный ответ с данными.
    pub fn success(data: T) -> Self {
        Self {
            code: CODE_SUCCESS,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    /// Ответ с ошибкой без данных.
    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// `true`, если `code == 0`.
    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }

    /// Превращает конверт в `Result`: данные при успехе (или `T::default()`,
    /// если `data` нет), `(code, message)` при ошибке.
    pub fn into_result(self) -> Result<T, (i64, String)>
    where
        T: Default,
    {
        if self.is_success() {
            Ok(self.data.unwrap_or_default())
        } else {
            Err((self.code, self.message))
        }
    }
}

impl ApiResponse<()> {
    /// Успешный ответ без данных (`data` не сериализуется).
    pub fn ok() -> Self {
        Self {
            code: CODE_SUCCESS,
            message: "success".to_string(),
            data: None,
        }
    }
}
