// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Settings and profile of the authenticated user's own account.
//!
//! Everything here is reached through `client.account()`, and needs a client that signs requests
//! on behalf of a user. Images handed to the profile calls are sent as base64 form fields.

use hyper::Method;
use serde::Deserialize;

use crate::client::Client;
use crate::common::*;
use crate::error::Result;
use crate::links;
use crate::user::User;

/// The authenticated user's account settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccountSettings {
    pub always_use_https: bool,
    pub discoverable_by_email: bool,
    pub geo_enabled: bool,
    /// The BCP 47 language code of the user's interface.
    pub language: String,
    pub protected: bool,
    pub screen_name: String,
    pub show_all_inline_media: bool,
    /// The hours during which notifications are held back.
    pub sleep_time: SleepTime,
    pub time_zone: Option<TimeZone>,
    /// The locations the user gets trending topics for.
    pub trend_location: Vec<TrendLocation>,
    pub use_cookie_personalization: bool,
}

/// Quiet hours, given as hours of the day in the user's time zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SleepTime {
    pub enabled: bool,
    pub start_time: Option<i32>,
    pub end_time: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimeZone {
    /// The display name, like `Pacific Time (US & Canada)`.
    pub name: String,
    /// The tz database name, like `America/Los_Angeles`.
    pub tzinfo_name: String,
    /// Offset from UTC, in seconds.
    pub utc_offset: i32,
}

/// A location Twitter reports trending topics for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrendLocation {
    pub country: String,
    #[serde(rename = "countryCode")]
    pub country_code: Option<String>,
    pub name: String,
    /// The `woeid` of the location containing this one.
    pub parentid: u64,
    #[serde(rename = "placeType")]
    pub place_type: PlaceType,
    pub url: String,
    /// The Yahoo! Where On Earth ID of this location.
    pub woeid: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlaceType {
    pub code: i32,
    pub name: String,
}

/// Changes to make with `Account::update_settings`. Fields left as `None` are not changed.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    /// The `woeid` to get trending topics for.
    pub trend_location_woeid: Option<u64>,
    pub sleep_time_enabled: Option<bool>,
    /// The hour quiet hours start at, from 0 to 23.
    pub start_sleep_time: Option<u8>,
    /// The hour quiet hours end at, from 0 to 23.
    pub end_sleep_time: Option<u8>,
    /// A Rails time zone name, like `Europe/Copenhagen`.
    pub time_zone: Option<String>,
    /// The BCP 47 language code for the user's interface.
    pub lang: Option<String>,
}

impl SettingsUpdate {
    fn add_to(&self, params: ParamList) -> ParamList {
        params
            .add_opt_param("trend_location_woeid", self.trend_location_woeid)
            .add_opt_param("sleep_time_enabled", self.sleep_time_enabled)
            .add_opt_param("start_sleep_time", self.start_sleep_time)
            .add_opt_param("end_sleep_time", self.end_sleep_time)
            .add_opt_param("time_zone", self.time_zone.clone())
            .add_opt_param("lang", self.lang.clone())
    }
}

/// Changes to make with `Account::update_profile`. Fields left as `None` are not changed.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// Display name, up to 20 characters.
    pub name: Option<String>,
    pub url: Option<String>,
    pub location: Option<String>,
    /// Up to 160 characters.
    pub description: Option<String>,
    /// A hex color, like `3D72A8`.
    pub profile_link_color: Option<String>,
}

impl ProfileUpdate {
    fn add_to(&self, params: ParamList) -> ParamList {
        params
            .add_opt_param("name", self.name.clone())
            .add_opt_param("url", self.url.clone())
            .add_opt_param("location", self.location.clone())
            .add_opt_param("description", self.description.clone())
            .add_opt_param("profile_link_color", self.profile_link_color.clone())
    }
}

/// Profile colors to set with `Account::update_profile_colors`, as hex strings like `3D72A8`.
/// Fields left as `None` are not changed.
#[derive(Debug, Clone, Default)]
pub struct ProfileColors {
    pub profile_background_color: Option<String>,
    pub profile_link_color: Option<String>,
    pub profile_sidebar_border_color: Option<String>,
    pub profile_sidebar_fill_color: Option<String>,
    pub profile_text_color: Option<String>,
}

impl ProfileColors {
    fn add_to(&self, params: ParamList) -> ParamList {
        params
            .add_opt_param("profile_background_color", self.profile_background_color.clone())
            .add_opt_param("profile_link_color", self.profile_link_color.clone())
            .add_opt_param(
                "profile_sidebar_border_color",
                self.profile_sidebar_border_color.clone(),
            )
            .add_opt_param("profile_sidebar_fill_color", self.profile_sidebar_fill_color.clone())
            .add_opt_param("profile_text_color", self.profile_text_color.clone())
    }
}

/// Calls on the authenticated user's account. Obtained from `Client::account`.
#[derive(Debug, Clone, Copy)]
pub struct Account<'a> {
    client: &'a Client,
}

impl<'a> Account<'a> {
    pub(crate) fn new(client: &'a Client) -> Account<'a> {
        Account { client }
    }

    /// Loads the account's settings.
    pub async fn settings(&self) -> Result<Response<AccountSettings>> {
        self.client
            .call(Method::GET, links::account::SETTINGS, &ParamList::new())
            .await
    }

    /// Loads the authenticated user's profile. Fails with a 401 `Error::Api` if the credentials
    /// are no longer valid.
    pub async fn verify_credentials(&self) -> Result<Response<User>> {
        self.client
            .call(Method::GET, links::account::VERIFY_CREDENTIALS, &ParamList::new())
            .await
    }

    /// Changes the account's settings, and returns the new settings.
    pub async fn update_settings(&self, update: &SettingsUpdate) -> Result<Response<AccountSettings>> {
        let params = update.add_to(ParamList::new());

        self.client
            .call(Method::POST, links::account::SETTINGS, &params)
            .await
    }

    /// Turns delivery of notifications by SMS on or off.
    pub async fn enable_sms(&self, enable: bool) -> Result<Response<()>> {
        let params = ParamList::new().add_param("device", if enable { "sms" } else { "none" });

        self.client
            .call_empty(Method::POST, links::account::UPDATE_DELIVERY_DEVICE, &params)
            .await
    }

    /// Changes the account's profile, and returns the updated user.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Response<User>> {
        let params = update.add_to(ParamList::new());

        self.client
            .call(Method::POST, links::account::UPDATE_PROFILE, &params)
            .await
    }

    /// Uploads a new profile background image and starts using it. An empty `image` leaves the
    /// current image in place, but stops using it.
    pub async fn update_profile_background_image(
        &self,
        image: &[u8],
        tile: Option<bool>,
    ) -> Result<Response<User>> {
        let params = if image.is_empty() {
            ParamList::new().add_param("use", false)
        } else {
            ParamList::new()
                .add_param("image", base64::encode(image))
                .add_param("use", true)
        };
        let params = params.add_opt_param("tile", tile);

        self.client
            .call(Method::POST, links::account::UPDATE_PROFILE_BACKGROUND_IMAGE, &params)
            .await
    }

    /// Changes the colors of the account's profile page.
    pub async fn update_profile_colors(&self, colors: &ProfileColors) -> Result<Response<User>> {
        let params = colors.add_to(ParamList::new());

        self.client
            .call(Method::POST, links::account::UPDATE_PROFILE_COLORS, &params)
            .await
    }

    /// Uploads a new avatar. GIF, JPG, and PNG images under 700 KB are accepted.
    pub async fn update_profile_image(&self, image: &[u8]) -> Result<Response<User>> {
        let params = ParamList::new().add_param("image", base64::encode(image));

        self.client
            .call(Method::POST, links::account::UPDATE_PROFILE_IMAGE, &params)
            .await
    }
}
