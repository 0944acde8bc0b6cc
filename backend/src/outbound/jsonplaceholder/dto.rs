//! DTOs for decoding upstream JSON payloads.
//!
//! The adapter decodes into these transport DTOs first, then maps into
//! domain records in one pass. Records missing a foreign key decode with
//! `None` and flow through as orphans; a user failing the mandatory-field
//! invariant is a decode error, since the store must never accept one.

use serde::Deserialize;

use crate::domain::{Address, Comment, Company, Geo, Post, User};

#[derive(Debug, Deserialize)]
pub(super) struct GeoDto {
    pub(super) lat: String,
    pub(super) lng: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddressDto {
    pub(super) street: String,
    pub(super) suite: String,
    pub(super) city: String,
    pub(super) zipcode: String,
    pub(super) geo: GeoDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CompanyDto {
    pub(super) name: String,
    pub(super) catch_phrase: String,
    pub(super) bs: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: i64,
    pub(super) name: String,
    pub(super) username: String,
    pub(super) email: String,
    pub(super) address: Option<AddressDto>,
    pub(super) phone: Option<String>,
    pub(super) website: Option<String>,
    pub(super) company: Option<CompanyDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PostDto {
    pub(super) id: i64,
    #[serde(default)]
    pub(super) user_id: Option<i64>,
    pub(super) title: String,
    pub(super) body: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CommentDto {
    pub(super) id: i64,
    #[serde(default)]
    pub(super) post_id: Option<i64>,
    pub(super) name: String,
    pub(super) email: String,
    pub(super) body: String,
}

impl From<GeoDto> for Geo {
    fn from(value: GeoDto) -> Self {
        Self {
            lat: value.lat,
            lng: value.lng,
        }
    }
}

impl From<AddressDto> for Address {
    fn from(value: AddressDto) -> Self {
        Self {
            street: value.street,
            suite: value.suite,
            city: value.city,
            zipcode: value.zipcode,
            geo: value.geo.into(),
        }
    }
}

impl From<CompanyDto> for Company {
    fn from(value: CompanyDto) -> Self {
        Self {
            name: value.name,
            catch_phrase: value.catch_phrase,
            bs: value.bs,
        }
    }
}

impl UserDto {
    pub(super) fn into_domain(self) -> Result<User, String> {
        let id = self.id;
        User {
            id: self.id,
            name: self.name,
            username: self.username,
            email: self.email,
            address: self.address.map(Address::from),
            phone: self.phone,
            website: self.website,
            company: self.company.map(Company::from),
        }
        .validated()
        .map_err(|error| format!("upstream user {id} rejected: {error}"))
    }
}

impl From<PostDto> for Post {
    fn from(value: PostDto) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            title: value.title,
            body: value.body,
        }
    }
}

impl From<CommentDto> for Comment {
    fn from(value: CommentDto) -> Self {
        Self {
            id: value.id,
            post_id: value.post_id,
            name: value.name,
            email: value.email,
            body: value.body,
        }
    }
}
